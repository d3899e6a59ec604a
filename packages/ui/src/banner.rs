use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaTriangleExclamation};
use crate::Icon;

/// Inline success / error messages for a page. Renders nothing when both are empty.
#[component]
pub fn StatusBanner(message: Option<String>, error: Option<String>) -> Element {
    rsx! {
        if let Some(error) = error.filter(|e| !e.is_empty()) {
            div {
                class: "banner banner-error",
                role: "alert",
                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                span { "{error}" }
            }
        }
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            div {
                class: "banner banner-success",
                Icon { icon: FaCircleCheck, width: 14, height: 14 }
                span { "{message}" }
            }
        }
    }
}

/// Placeholder shown while a page or the session is loading.
#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading", "{label}" }
    }
}
