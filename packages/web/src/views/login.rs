//! Login page: username/password against the backend.

use api::auth::{login_error_message, AuthClient};
use dioxus::prelude::*;
use ui::{make_endpoints, make_transport, use_session, StatusBanner};

use crate::Route;

#[component]
pub fn LoginPage(from: String) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already logged in: skip the form
    if session.is_authenticated() {
        nav.replace(Route::after_login(&from));
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let target = Route::after_login(&from);
        spawn(async move {
            error.set(None);
            loading.set(true);

            let client = AuthClient::new(make_transport(), make_endpoints());
            match client.login(&username(), &password()).await {
                Ok(logged_in) => {
                    session.login(&logged_in.user, logged_in.token);
                    username.set(String::new());
                    password.set(String::new());
                    nav.replace(target);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    error.set(Some(login_error_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-box",
                h2 { "Login" }
                StatusBanner { error: error() }
                form {
                    onsubmit: onsubmit,
                    div {
                        class: "input-group",
                        input {
                            r#type: "text",
                            placeholder: "Username or Email",
                            value: username(),
                            disabled: loading(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "input-group",
                        input {
                            r#type: "password",
                            placeholder: "Password",
                            value: password(),
                            disabled: loading(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Logging in..." } else { "Login" }
                    }
                }
                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    Link { to: Route::SignupPage {}, "Sign up" }
                }
            }
        }
    }
}
