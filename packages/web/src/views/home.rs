use dioxus::prelude::*;
use ui::icons::{FaBell, FaCalendarDays, FaClock};
use ui::{use_session, Icon};

use crate::Route;

#[component]
pub fn HomePage() -> Element {
    let session = use_session();
    let username = session.student_id();

    rsx! {
        div {
            class: "home",
            section {
                class: "hero",
                h1 { "Track your academic journey with ease" }
                p { class: "muted", "Welcome back, {username}." }
                p {
                    "Manage your timetable, keep your attendance above the pass mark and "
                    "follow your quiz and exam results, all in one place."
                }
                div {
                    class: "hero-buttons",
                    Link { class: "btn btn-primary", to: Route::TimetablePage {}, "Today's classes" }
                    Link { class: "btn", to: Route::AboutUsPage {}, "Learn more" }
                }
            }
            section {
                class: "feature-cards",
                FeatureCard {
                    to: Route::AttendancePage {},
                    title: "Attendance",
                    text: "Log each session and see how many hours you still need per subject.",
                    Icon { icon: FaClock, width: 28, height: 28 }
                }
                FeatureCard {
                    to: Route::TimetablePage {},
                    title: "Timetable",
                    text: "Regular weekly classes and one-off special sessions at a glance.",
                    Icon { icon: FaCalendarDays, width: 28, height: 28 }
                }
                FeatureCard {
                    to: Route::ExamsQuizPage {},
                    title: "Exams & Quizzes",
                    text: "Record your marks and follow grades and pass status.",
                    Icon { icon: FaBell, width: 28, height: 28 }
                }
            }
        }
    }
}

#[component]
fn FeatureCard(to: Route, title: String, text: String, children: Element) -> Element {
    rsx! {
        Link {
            class: "card",
            to: to,
            div { class: "card-icon", {children} }
            h3 { "{title}" }
            p { "{text}" }
        }
    }
}
