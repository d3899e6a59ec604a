//! Session context and hooks for the UI.

use api::{SessionState, UserInfo};
use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::platform::make_session_service;
use crate::Icon;

/// Copyable handle to the shared session.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionHandle {
    state: Signal<SessionState>,
}

impl SessionHandle {
    /// Current state; subscribes the calling component.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Owner id for data calls.
    pub fn student_id(&self) -> String {
        self.state.read().student_id().to_string()
    }

    pub fn login(&self, user: &UserInfo, token: Option<String>) {
        let mut state = self.state;
        state.set(make_session_service().login(user, token));
    }

    pub fn logout(&self) {
        let mut state = self.state;
        state.set(make_session_service().logout());
    }
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session.
/// Starts `Unknown` and restores from storage once mounted.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut state = use_signal(SessionState::default);

    use_effect(move || {
        if *state.peek() == SessionState::Unknown {
            state.set(make_session_service().restore());
        }
    });

    use_context_provider(|| SessionHandle { state });

    rsx! {
        {children}
    }
}

/// Button that clears the session, then calls `on_logout` so the app can navigate.
#[component]
pub fn LogoutButton(
    on_logout: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        session.logout();
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
