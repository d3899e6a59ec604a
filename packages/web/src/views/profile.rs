//! Profile page. The profile is kept in memory only and never sent to the backend.

use api::models::{ProfileSetup, Role};
use dioxus::prelude::*;
use ui::{use_profile, use_session, FormField, StatusBanner};

#[component]
pub fn ProfilePage() -> Element {
    let mut profile = use_profile();
    let session = use_session();
    let mut draft = use_signal(ProfileSetup::default);
    let mut editing = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let setup = draft();
        match profile.write().set(setup) {
            Ok(_) => {
                error.set(None);
                editing.set(false);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let current = profile.read().get().cloned();
    let show_form = editing() || !profile.read().is_complete();

    rsx! {
        div {
            class: "page-header",
            h1 { "Profile" }
        }
        StatusBanner { error: error() }

        if show_form {
            form {
                class: "profile-form",
                onsubmit: onsubmit,
                p { class: "muted", "Set up your profile. It is kept for this session only." }
                FormField { label: "Full name",
                    input {
                        value: draft.read().full_name.clone(),
                        oninput: move |evt: FormEvent| draft.write().full_name = evt.value(),
                    }
                }
                FormField { label: "Role",
                    select {
                        value: draft.read().role.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Some(role) = Role::parse(&evt.value()) {
                                draft.write().role = role;
                            }
                        },
                        for role in Role::ALL {
                            option { value: role.as_str(), "{role}" }
                        }
                    }
                }
                FormField { label: "Student id",
                    input {
                        value: draft.read().student_id.clone(),
                        oninput: move |evt: FormEvent| draft.write().student_id = evt.value(),
                    }
                }
                FormField { label: "Major",
                    input {
                        value: draft.read().major.clone(),
                        oninput: move |evt: FormEvent| draft.write().major = evt.value(),
                    }
                }
                FormField { label: "Phone",
                    input {
                        r#type: "tel",
                        value: draft.read().phone.clone(),
                        oninput: move |evt: FormEvent| draft.write().phone = evt.value(),
                    }
                }
                FormField { label: "Date of birth",
                    input {
                        r#type: "date",
                        value: draft.read().date_of_birth.clone(),
                        oninput: move |evt: FormEvent| draft.write().date_of_birth = evt.value(),
                    }
                }
                FormField { label: "Bio",
                    textarea {
                        value: draft.read().bio.clone(),
                        oninput: move |evt: FormEvent| draft.write().bio = evt.value(),
                    }
                }
                div {
                    class: "form-actions",
                    if current.is_some() {
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Save profile" }
                }
            }
        } else if let Some(p) = current {
            div {
                class: "profile-card",
                div { class: "avatar", "{p.avatar_initials}" }
                h2 { "{p.full_name}" }
                p { class: "muted", "{p.role} · signed in as {session.student_id()}" }
                dl {
                    dt { "Student id" }
                    dd { "{p.student_id}" }
                    dt { "Major" }
                    dd { "{p.major}" }
                    dt { "Phone" }
                    dd { "{p.phone}" }
                    dt { "Date of birth" }
                    dd { "{p.date_of_birth}" }
                }
                if !p.bio.is_empty() {
                    p { class: "bio", "{p.bio}" }
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        if let Some(stored) = profile.read().get() {
                            draft.set(stored.to_setup());
                        }
                        editing.set(true);
                    },
                    "Edit profile"
                }
            }
        }
    }
}
