//! Guarded layout shared by every page behind login.

use api::{guard, GuardDecision};
use dioxus::prelude::*;
use ui::{use_profile, use_session, Footer, Loading, LogoutButton, Navbar};

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let mut profile = use_profile();

    match guard(&session.state(), &route.to_string()) {
        GuardDecision::Loading => rsx! {
            Loading { label: "Checking session..." }
        },
        GuardDecision::Redirect(target) => {
            tracing::debug!(%target, "redirecting to login");
            let login = target
                .parse::<Route>()
                .unwrap_or(Route::LoginPage { from: String::new() });
            nav.replace(login);
            rsx! {}
        }
        GuardDecision::Render => rsx! {
            Navbar {
                Link { to: Route::HomePage {}, "Home" }
                Link { to: Route::TimetablePage {}, "Timetable" }
                Link { to: Route::AttendancePage {}, "Attendance" }
                Link { to: Route::ExamsQuizPage {}, "Exams & Quizzes" }
                Link { to: Route::ProfilePage {}, "Profile" }
                Link { to: Route::AboutUsPage {}, "About" }
                Link { to: Route::ContactUs {}, "Contact" }
                LogoutButton {
                    on_logout: move |_| {
                        profile.write().clear();
                        nav.replace(Route::LoginPage { from: String::new() });
                    },
                }
            }
            main {
                class: "page",
                Outlet::<Route> {}
            }
            Footer {}
        },
    }
}

/// Unknown paths go to the login page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!(path = %segments.join("/"), "unknown route");
    nav.replace(Route::LoginPage { from: String::new() });
    rsx! {}
}
