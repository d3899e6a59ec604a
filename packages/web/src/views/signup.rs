//! Signup page. Redirects to login shortly after a successful registration.

use api::auth::{AuthClient, NETWORK_ERROR_MESSAGE};
use api::ApiError;
use dioxus::prelude::*;
use ui::{make_endpoints, make_transport, pause, StatusBanner};

use crate::Route;

const REDIRECT_DELAY_MS: u32 = 2000;

#[component]
pub fn SignupPage() -> Element {
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut message = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            message.set(None);
            loading.set(true);

            let client = AuthClient::new(make_transport(), make_endpoints());
            let result = client.register(&username(), &email(), &password()).await;
            loading.set(false);

            match result {
                Ok(text) => {
                    message.set(Some(text));
                    username.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    pause(REDIRECT_DELAY_MS).await;
                    nav.push(Route::LoginPage { from: String::new() });
                }
                Err(ApiError::Network(reason)) => {
                    tracing::warn!(%reason, "signup request failed");
                    error.set(Some(NETWORK_ERROR_MESSAGE.to_string()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-box",
                h2 { "Sign Up" }
                StatusBanner { message: message(), error: error() }
                form {
                    onsubmit: onsubmit,
                    div {
                        class: "input-group",
                        input {
                            r#type: "text",
                            placeholder: "Username",
                            value: username(),
                            disabled: loading(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "input-group",
                        input {
                            r#type: "email",
                            placeholder: "Email",
                            value: email(),
                            disabled: loading(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
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
                        if loading() { "Creating account..." } else { "Sign Up" }
                    }
                }
                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::LoginPage { from: String::new() }, "Login" }
                }
            }
        }
    }
}
