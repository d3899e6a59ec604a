use dioxus::prelude::*;

use ui::{ProfileProvider, SessionProvider};
use views::{
    AboutUsPage, AppLayout, AttendancePage, ContactUs, ExamsQuizPage, HomePage, LoginPage, NotFound,
    ProfilePage, SignupPage, TimetablePage,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::LoginPage { from: String::new() })]
    #[redirect("/login", || Route::LoginPage { from: String::new() })]
    #[route("/loginpage?:from")]
    LoginPage { from: String },
    #[redirect("/signup", || Route::SignupPage {})]
    #[route("/signuppage")]
    SignupPage {},
    #[layout(AppLayout)]
        #[redirect("/home", || Route::HomePage {})]
        #[route("/homepage")]
        HomePage {},
        #[route("/contactus")]
        ContactUs {},
        #[route("/aboutuspage")]
        AboutUsPage {},
        #[route("/timetablepage")]
        TimetablePage {},
        #[route("/attendancepage")]
        AttendancePage {},
        #[route("/examsquizpage")]
        ExamsQuizPage {},
        #[route("/profilepage")]
        ProfilePage {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Where to go after login: `from` when it names a guarded page, else home.
    fn after_login(from: &str) -> Route {
        match api::session::guard::return_path(from).parse::<Route>() {
            Ok(route) if route.is_guarded() => route,
            _ => Route::HomePage {},
        }
    }

    fn is_guarded(&self) -> bool {
        !matches!(
            self,
            Route::LoginPage { .. } | Route::SignupPage {} | Route::NotFound { .. }
        )
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SessionProvider {
            ProfileProvider {
                Router::<Route> {}
            }
        }
    }
}
