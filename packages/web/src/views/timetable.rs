//! Timetable page: regular weekly classes and special one-off sessions.

use api::models::timetable::NOTIFICATION_PREFERENCES;
use api::models::{short_time, TimetableEntry, DAYS};
use api::{StateHandle, TimetableEndpoints, TimetableView};
use dioxus::prelude::*;
use ui::{
    confirm, make_endpoints, page_controller, use_resource_state, use_session, FormActions, FormField, ModalOverlay,
    PageController, SignalState, StatusBanner,
};

type Controller = PageController<TimetableEntry, TimetableEndpoints>;

fn controller(state: SignalState<TimetableEntry>, view: TimetableView, owner: String) -> Controller {
    page_controller(state, TimetableEndpoints::new(make_endpoints(), view), owner)
}

fn view_from_select(value: &str, day: &str) -> TimetableView {
    match value {
        "all" => TimetableView::All,
        "special" => TimetableView::Special,
        "day" => TimetableView::Day(day.to_string()),
        _ => TimetableView::Today,
    }
}

#[component]
pub fn TimetablePage() -> Element {
    let session = use_session();
    let state = use_resource_state::<TimetableEntry>();
    let mut view = use_signal(TimetableView::default);
    let mut day = use_signal(|| DAYS[0].to_string());

    // Re-list whenever the view changes
    use_effect(move || {
        let view = view();
        let owner = session.student_id();
        spawn(async move {
            let _ = controller(state, view, owner).list().await;
        });
    });

    let snapshot = state.snapshot();
    let form = snapshot.form.clone();
    let editing = snapshot.editing.is_some();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let _ = controller(state, view(), session.student_id()).submit().await;
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Timetable" }
            button {
                class: "btn btn-primary",
                onclick: move |_| state.with(|s| s.open_create()),
                "Add entry"
            }
        }

        StatusBanner { message: snapshot.message.clone(), error: snapshot.error.clone() }

        div {
            class: "toolbar",
            select {
                value: view().label(),
                onchange: move |evt: FormEvent| view.set(view_from_select(&evt.value(), &day())),
                option { value: "today", "Today" }
                option { value: "all", "On today (all entries)" }
                option { value: "special", "Special sessions" }
                option { value: "day", "By day" }
            }
            if matches!(view(), TimetableView::Day(_)) {
                select {
                    value: day(),
                    onchange: move |evt: FormEvent| {
                        day.set(evt.value());
                        view.set(TimetableView::Day(evt.value()));
                    },
                    for d in DAYS {
                        option { value: d, "{d}" }
                    }
                }
            }
        }

        if snapshot.loading {
            ui::Loading {}
        } else if snapshot.records.is_empty() {
            p { class: "muted", "No classes scheduled for this view." }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Subject" }
                        th { "Schedule" }
                        th { "Time" }
                        th { "Location" }
                        th { "Lecturer" }
                        th { "Notify" }
                        th {}
                    }
                }
                tbody {
                    for entry in snapshot.records.iter().cloned() {
                        TimetableRow { key: "{entry.id:?}", entry, state, view: view(), owner: session.student_id() }
                    }
                }
            }
        }

        if snapshot.form_open {
            ModalOverlay {
                title: if editing { "Edit timetable entry" } else { "Add timetable entry" },
                on_close: move |_| state.with(|s| s.close_form()),
                form {
                    onsubmit: onsubmit,
                    FormField { label: "Subject",
                        input {
                            value: form.subject.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.subject = evt.value()),
                        }
                    }
                    FormField { label: "Special session",
                        input {
                            r#type: "checkbox",
                            checked: form.special_schedule,
                            onchange: move |evt: FormEvent| state.with(|s| s.form.set_special(evt.checked())),
                        }
                    }
                    if form.special_schedule {
                        FormField { label: "Date",
                            input {
                                r#type: "date",
                                value: form.special_date.clone().unwrap_or_default(),
                                oninput: move |evt: FormEvent| state.with(|s| s.form.special_date = Some(evt.value())),
                            }
                        }
                        FormField { label: "Title",
                            input {
                                value: form.title.clone().unwrap_or_default(),
                                oninput: move |evt: FormEvent| {
                                    let value = evt.value();
                                    state.with(|s| s.form.title = (!value.is_empty()).then_some(value));
                                },
                            }
                        }
                    } else {
                        FormField { label: "Day",
                            select {
                                value: form.day.clone(),
                                onchange: move |evt: FormEvent| state.with(|s| s.form.day = evt.value()),
                                for d in DAYS {
                                    option { value: d, "{d}" }
                                }
                            }
                        }
                    }
                    FormField { label: "Start time",
                        input {
                            r#type: "time",
                            value: form.start_time.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.start_time = evt.value()),
                        }
                    }
                    FormField { label: "End time",
                        input {
                            r#type: "time",
                            value: form.end_time.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.end_time = evt.value()),
                        }
                    }
                    FormField { label: "Location",
                        input {
                            value: form.location.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.location = evt.value()),
                        }
                    }
                    FormField { label: "Lecturer",
                        input {
                            value: form.lecturer.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.lecturer = evt.value()),
                        }
                    }
                    FormField { label: "Notification",
                        select {
                            value: form.notification_preference.clone(),
                            onchange: move |evt: FormEvent| state.with(|s| s.form.notification_preference = evt.value()),
                            for pref in NOTIFICATION_PREFERENCES {
                                option { value: pref, "{pref}" }
                            }
                        }
                    }
                    FormField { label: "Description",
                        textarea {
                            value: form.description.clone().unwrap_or_default(),
                            oninput: move |evt: FormEvent| {
                                let value = evt.value();
                                state.with(|s| s.form.description = (!value.is_empty()).then_some(value));
                            },
                        }
                    }
                    FormActions {
                        submit_label: if editing { "Update" } else { "Add" },
                        busy: snapshot.loading,
                        on_cancel: move |_| state.with(|s| s.close_form()),
                    }
                }
            }
        }
    }
}

#[component]
fn TimetableRow(entry: TimetableEntry, state: SignalState<TimetableEntry>, view: TimetableView, owner: String) -> Element {
    let id = entry.id;
    let record = entry.clone();

    rsx! {
        tr {
            td {
                "{entry.subject}"
                if entry.special_schedule {
                    span { class: "tag", "special" }
                }
            }
            td { "{entry.schedule_label()}" }
            td { "{short_time(&entry.start_time)} - {short_time(&entry.end_time)}" }
            td { "{entry.location}" }
            td { "{entry.lecturer}" }
            td { "{entry.notification_preference}" }
            td {
                class: "row-actions",
                button {
                    class: "btn btn-small",
                    onclick: move |_| state.with(|s| s.open_edit(&record)),
                    "Edit"
                }
                if let Some(id) = id {
                    button {
                        class: "btn btn-small btn-danger",
                        onclick: move |_| {
                            let view = view.clone();
                            let owner = owner.clone();
                            spawn(async move {
                                let _ = controller(state, view, owner).delete(id, confirm).await;
                            });
                        },
                        "Delete"
                    }
                }
            }
        }
    }
}
