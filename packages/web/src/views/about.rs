//! Static about and contact pages.

use dioxus::prelude::*;

#[component]
pub fn AboutUsPage() -> Element {
    rsx! {
        div {
            class: "about",
            h2 { "Welcome to SEM-Tracker" }
            p {
                "A tool for tracking and managing your academic semester. It helps students "
                "keep their class schedule, attendance and assessment results in one place."
            }
            p {
                "Special sessions sit next to your regular weekly timetable, attendance is "
                "measured against each subject's pass percentage, and every mark is graded "
                "as soon as you enter it."
            }
            p { "Staying on top of your goals is the key to a good semester." }
        }
    }
}

/// Contact form. Nothing is sent; submitting only acknowledges the message.
#[component]
pub fn ContactUs() -> Element {
    let mut sent = use_signal(|| false);

    rsx! {
        div {
            class: "contact",
            form {
                class: "contact-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    sent.set(true);
                },
                h1 { "Contact Us" }
                input { r#type: "text", name: "name", placeholder: "Name", required: true }
                input { r#type: "email", name: "email", placeholder: "Email", required: true }
                textarea { name: "message", placeholder: "What do you want to say?", required: true }
                button { class: "btn btn-primary", r#type: "submit", "Submit" }
                if sent() {
                    p { class: "muted", "Thanks! We'll get back to you." }
                }
            }
        }
    }
}
