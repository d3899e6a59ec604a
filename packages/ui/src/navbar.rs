use dioxus::prelude::*;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: the app name on the left, page links and actions as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            div { class: "navbar-logo", "SEM-Tracker" }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: "footer",
            p { "SEM-Tracker · Timetable, attendance and marks in one place" }
        }
    }
}
