//! Attendance page: session records, per-subject progress and the overall summary.
//!
//! Any change to a record also refreshes the subject cards and the summary,
//! since the backend recomputes both from the records. The summary goes
//! through a [`FetchState`] so overlapping refreshes keep only the newest.

use api::models::{date_part, short_time, AttendanceRecord, AttendanceSummary, SubjectAttendanceSettings};
use api::{fetch_json, AttendanceEndpoints, FetchState, StateHandle, SubjectSettingsEndpoints};
use dioxus::prelude::*;
use ui::platform::make_config;
use ui::{
    confirm, make_endpoints, make_transport, page_controller, use_resource_state, use_session, FormActions,
    FormField, ModalOverlay, SignalState, StatusBanner,
};

fn parse_hours(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

#[derive(Clone, Copy, PartialEq)]
struct AttendanceStates {
    records: SignalState<AttendanceRecord>,
    subjects: SignalState<SubjectAttendanceSettings>,
    summary: Signal<FetchState<AttendanceSummary>>,
}

impl AttendanceStates {
    fn records(&self, owner: &str) -> ui::PageController<AttendanceRecord, AttendanceEndpoints> {
        page_controller(self.records, AttendanceEndpoints(make_endpoints()), owner)
    }

    fn subjects(&self, owner: &str) -> ui::PageController<SubjectAttendanceSettings, SubjectSettingsEndpoints> {
        page_controller(self.subjects, SubjectSettingsEndpoints(make_endpoints()), owner)
    }

    async fn refresh_summary(&self, owner: &str) {
        let mut summary = self.summary;
        let ticket = summary.write().begin();
        let url = make_endpoints().attendance_summary(owner);
        let result = fetch_json::<AttendanceSummary, _>(&make_transport(), &url).await;
        summary.write().apply(ticket, result);
    }

    async fn refresh_derived(&self, owner: &str) {
        let _ = self.subjects(owner).list().await;
        self.refresh_summary(owner).await;
    }
}

#[component]
pub fn AttendancePage() -> Element {
    let session = use_session();
    let states = AttendanceStates {
        records: use_resource_state::<AttendanceRecord>(),
        subjects: use_resource_state::<SubjectAttendanceSettings>(),
        summary: use_signal(|| FetchState::new("attendance summary")),
    };
    let config = use_hook(make_config);
    let threshold = config.attendance.warning_threshold;
    let default_pass = config.attendance.default_pass_percentage;

    use_effect(move || {
        let owner = session.student_id();
        spawn(async move {
            let _ = states.records(&owner).list().await;
            states.refresh_derived(&owner).await;
        });
    });

    let records = states.records.snapshot();
    let subjects = states.subjects.snapshot();

    rsx! {
        div {
            class: "page-header",
            h1 { "Attendance" }
            div {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| states.records.with(|s| s.open_create()),
                    "Log attendance"
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        states
                            .subjects
                            .with(|s| s.open_create_with(SubjectAttendanceSettings::with_pass_percentage(default_pass)))
                    },
                    "Subject settings"
                }
            }
        }

        StatusBanner { message: records.message.clone(), error: records.error.clone() }
        StatusBanner { message: subjects.message.clone(), error: subjects.error.clone() }
        StatusBanner { error: states.summary.read().error.clone() }

        if let Some(summary) = states.summary.read().value.clone() {
            SummaryPanel { summary, threshold }
        }

        h2 { "Subjects" }
        if subjects.records.is_empty() {
            p { class: "muted", "No subject settings yet. Add one to track progress against a pass percentage." }
        } else {
            div {
                class: "subject-cards",
                for subject in subjects.records.iter().cloned() {
                    SubjectCard { key: "{subject.subject_name}", subject }
                }
            }
        }

        h2 { "Records" }
        if records.loading && records.records.is_empty() {
            ui::Loading {}
        } else if records.records.is_empty() {
            p { class: "muted", "No attendance recorded yet." }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Module" }
                        th { "Date" }
                        th { "Time" }
                        th { "Hours" }
                        th {}
                    }
                }
                tbody {
                    for record in records.records.iter().cloned() {
                        RecordRow { key: "{record.id:?}", record, states, owner: session.student_id() }
                    }
                }
            }
        }

        if records.form_open {
            RecordForm { states, form: records.form.clone(), editing: records.editing.is_some(), busy: records.loading }
        }
        if subjects.form_open {
            SubjectForm { states, form: subjects.form.clone(), busy: subjects.loading }
        }
    }
}

#[component]
fn SummaryPanel(summary: AttendanceSummary, threshold: f64) -> Element {
    let below = summary.below(threshold);
    let class = if below { "summary summary-warning" } else { "summary" };
    rsx! {
        div {
            class: "{class}",
            div { class: "summary-figure", "{summary.overall_attendance_percentage:.1}%" }
            div {
                p { "{summary.total_attended_hours:.1} of {summary.total_scheduled_hours:.1} scheduled hours attended" }
                p { class: "muted", "{summary.total_records} records" }
                if below {
                    p { class: "warning", "Your overall attendance is below {threshold:.0}%." }
                }
            }
        }
    }
}

#[component]
fn SubjectCard(subject: SubjectAttendanceSettings) -> Element {
    let eligible = subject.is_eligible();
    let needed = subject.needed_hours();
    let class = if eligible { "card card-ok" } else { "card card-warning" };
    rsx! {
        div {
            class: "{class}",
            h3 { "{subject.subject_name}" }
            p { "{subject.attendance_percentage:.1}% attended (pass at {subject.pass_percentage:.0}%)" }
            p { "{subject.total_attended_hours:.1} / {subject.total_scheduled_hours:.1} hours" }
            if eligible {
                p { class: "tag tag-ok", "Eligible" }
            } else {
                p { class: "tag tag-warning", "Not eligible · {needed:.1} more hours needed" }
            }
        }
    }
}

#[component]
fn RecordRow(record: AttendanceRecord, states: AttendanceStates, owner: String) -> Element {
    let id = record.id;
    let stored = record.clone();

    rsx! {
        tr {
            td { "{record.module_name}" }
            td { "{date_part(&record.attendance_date)}" }
            td { "{short_time(&record.start_time)} - {short_time(&record.end_time)}" }
            td { "{record.attended_hours:.1}" }
            td {
                class: "row-actions",
                button {
                    class: "btn btn-small",
                    onclick: move |_| states.records.with(|s| s.open_edit(&stored)),
                    "Edit"
                }
                if let Some(id) = id {
                    button {
                        class: "btn btn-small btn-danger",
                        onclick: move |_| {
                            let owner = owner.clone();
                            spawn(async move {
                                if states.records(&owner).delete(id, confirm).await.is_ok() {
                                    states.refresh_derived(&owner).await;
                                }
                            });
                        },
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
fn RecordForm(states: AttendanceStates, form: AttendanceRecord, editing: bool, busy: bool) -> Element {
    let session = use_session();
    let records = states.records;

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let owner = session.student_id();
            if states.records(&owner).submit().await.is_ok() {
                states.refresh_derived(&owner).await;
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: if editing { "Edit attendance record" } else { "Log attendance" },
            on_close: move |_| records.with(|s| s.close_form()),
            form {
                onsubmit: onsubmit,
                FormField { label: "Module",
                    input {
                        value: form.module_name.clone(),
                        oninput: move |evt: FormEvent| records.with(|s| s.form.module_name = evt.value()),
                    }
                }
                FormField { label: "Date",
                    input {
                        r#type: "date",
                        value: form.attendance_date.clone(),
                        oninput: move |evt: FormEvent| records.with(|s| s.form.attendance_date = evt.value()),
                    }
                }
                FormField { label: "Start time",
                    input {
                        r#type: "time",
                        value: form.start_time.clone(),
                        oninput: move |evt: FormEvent| records.with(|s| s.form.start_time = evt.value()),
                    }
                }
                FormField { label: "End time",
                    input {
                        r#type: "time",
                        value: form.end_time.clone(),
                        oninput: move |evt: FormEvent| records.with(|s| s.form.end_time = evt.value()),
                    }
                }
                FormField { label: "Hours attended",
                    input {
                        r#type: "number",
                        step: "0.5",
                        min: "0",
                        value: "{form.attended_hours}",
                        oninput: move |evt: FormEvent| records.with(|s| s.form.attended_hours = parse_hours(&evt.value())),
                    }
                }
                FormActions {
                    submit_label: if editing { "Update" } else { "Save" },
                    busy,
                    on_cancel: move |_| records.with(|s| s.close_form()),
                }
            }
        }
    }
}

/// Settings are upserted by subject name, so this form only ever creates.
#[component]
fn SubjectForm(states: AttendanceStates, form: SubjectAttendanceSettings, busy: bool) -> Element {
    let session = use_session();
    let subjects = states.subjects;

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let owner = session.student_id();
            if states.subjects(&owner).submit().await.is_ok() {
                states.refresh_summary(&owner).await;
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Subject settings",
            on_close: move |_| subjects.with(|s| s.close_form()),
            form {
                onsubmit: onsubmit,
                FormField { label: "Subject",
                    input {
                        value: form.subject_name.clone(),
                        oninput: move |evt: FormEvent| subjects.with(|s| s.form.subject_name = evt.value()),
                    }
                }
                FormField { label: "Total scheduled hours",
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{form.total_scheduled_hours}",
                        oninput: move |evt: FormEvent| subjects.with(|s| s.form.total_scheduled_hours = parse_hours(&evt.value())),
                    }
                }
                FormField { label: "Pass percentage",
                    input {
                        r#type: "number",
                        min: "0",
                        max: "100",
                        value: "{form.pass_percentage}",
                        oninput: move |evt: FormEvent| subjects.with(|s| s.form.pass_percentage = parse_hours(&evt.value())),
                    }
                }
                FormActions {
                    submit_label: "Save",
                    busy,
                    on_cancel: move |_| subjects.with(|s| s.close_form()),
                }
            }
        }
    }
}
