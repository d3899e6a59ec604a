//! Exams & quizzes page: marks with percentage, grade and pass status.

use api::models::{date_part, AssessmentType, QuizRecord, SubjectRef};
use api::{MarksEndpoints, StateHandle};
use dioxus::prelude::*;
use ui::{
    confirm, make_endpoints, page_controller, use_resource_state, use_session, FormActions, FormField, ModalOverlay,
    PageController, SignalState, StatusBanner,
};

fn controller(state: SignalState<QuizRecord>, owner: String) -> PageController<QuizRecord, MarksEndpoints> {
    page_controller(state, MarksEndpoints(make_endpoints()), owner)
}

fn parse_marks(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

#[component]
pub fn ExamsQuizPage() -> Element {
    let session = use_session();
    let state = use_resource_state::<QuizRecord>();

    use_effect(move || {
        let owner = session.student_id();
        spawn(async move {
            let _ = controller(state, owner).list().await;
        });
    });

    let snapshot = state.snapshot();
    let form = snapshot.form.clone();
    let editing = snapshot.editing.is_some();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let _ = controller(state, session.student_id()).submit().await;
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Exams & Quizzes" }
            button {
                class: "btn btn-primary",
                onclick: move |_| state.with(|s| s.open_create()),
                "Add result"
            }
        }

        StatusBanner { message: snapshot.message.clone(), error: snapshot.error.clone() }

        if snapshot.loading && snapshot.records.is_empty() {
            ui::Loading {}
        } else if snapshot.records.is_empty() {
            p { class: "muted", "No results recorded yet." }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Subject" }
                        th { "Type" }
                        th { "Date" }
                        th { "Marks" }
                        th { "Percentage" }
                        th { "Grade" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    for record in snapshot.records.iter().cloned() {
                        MarksRow { key: "{record.id:?}", record, state, owner: session.student_id() }
                    }
                }
            }
        }

        if snapshot.form_open {
            ModalOverlay {
                title: if editing { "Edit result" } else { "Add result" },
                on_close: move |_| state.with(|s| s.close_form()),
                form {
                    onsubmit: onsubmit,
                    FormField { label: "Subject id",
                        input {
                            r#type: "number",
                            min: "1",
                            value: "{form.subject.id}",
                            oninput: move |evt: FormEvent| {
                                if let Ok(id) = evt.value().trim().parse::<i64>() {
                                    state.with(|s| s.form.subject = SubjectRef { id, name: None });
                                }
                            },
                        }
                    }
                    FormField { label: "Assessment type",
                        select {
                            value: form.assessment_type.as_str(),
                            onchange: move |evt: FormEvent| state.with(|s| s.form.assessment_type = AssessmentType::parse(&evt.value())),
                            if !form.assessment_type.is_selectable() {
                                option { value: form.assessment_type.as_str(), "{form.assessment_type.as_str()}" }
                            }
                            for kind in AssessmentType::SELECTABLE {
                                option { value: kind.as_str(), "{kind.as_str()}" }
                            }
                        }
                    }
                    FormField { label: "Date",
                        input {
                            r#type: "date",
                            value: form.assessment_date.clone(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.assessment_date = evt.value()),
                        }
                    }
                    FormField { label: "Obtained marks",
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{form.obtained_marks}",
                            oninput: move |evt: FormEvent| state.with(|s| s.form.obtained_marks = parse_marks(&evt.value())),
                        }
                    }
                    FormField { label: "Total marks",
                        input {
                            r#type: "number",
                            min: "1",
                            value: "{form.total_marks}",
                            oninput: move |evt: FormEvent| state.with(|s| s.form.total_marks = parse_marks(&evt.value())),
                        }
                    }
                    FormField { label: "Pass marks",
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{form.pass_marks}",
                            oninput: move |evt: FormEvent| state.with(|s| s.form.pass_marks = parse_marks(&evt.value())),
                        }
                    }
                    FormField { label: "Remarks",
                        textarea {
                            value: form.remarks.clone().unwrap_or_default(),
                            oninput: move |evt: FormEvent| state.with(|s| s.form.remarks = Some(evt.value())),
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
fn MarksRow(record: QuizRecord, state: SignalState<QuizRecord>, owner: String) -> Element {
    let id = record.id;
    let stored = record.clone();
    let passed = record.passed();
    let percentage = record.percentage();
    let grade = record.grade();

    rsx! {
        tr {
            td { "{record.subject.label()}" }
            td { "{record.assessment_type.as_str()}" }
            td { "{date_part(&record.assessment_date)}" }
            td { "{record.obtained_marks} / {record.total_marks}" }
            td { "{percentage:.1}%" }
            td { class: "grade", "{grade}" }
            td {
                if passed {
                    span { class: "tag tag-ok", "Pass" }
                } else {
                    span { class: "tag tag-warning", "Fail" }
                }
            }
            td {
                class: "row-actions",
                if let Some(id) = id {
                    button {
                        class: "btn btn-small",
                        onclick: move |_| state.with(|s| s.open_edit(&stored)),
                        "Edit"
                    }
                    button {
                        class: "btn btn-small btn-danger",
                        onclick: move |_| {
                            let owner = owner.clone();
                            spawn(async move {
                                let _ = controller(state, owner).delete(id, confirm).await;
                            });
                        },
                        "Delete"
                    }
                }
            }
        }
    }
}
