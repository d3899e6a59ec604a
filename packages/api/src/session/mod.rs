//! # Client session
//!
//! The session is a three-state machine:
//!
//! ```text
//! Unknown ──restore()──▶ Anonymous | Authenticated
//! any     ──login()────▶ Authenticated
//! any     ──logout()───▶ Anonymous
//! ```
//!
//! `Unknown` exists only until storage has been read. [`SessionService`] owns the
//! durable half (a [`KeyValueStore`]) and is handed in by the caller; there is no
//! global. Tokens are never checked for expiry: a stale token only shows up when
//! a backend call rejects it.

pub mod guard;

use store::{keys, KeyValueStore};

use crate::models::UserInfo;

/// Student id used for data calls when nobody is logged in.
pub const FALLBACK_STUDENT_ID: &str = "default_user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(session) => Some(&session.username),
            _ => None,
        }
    }

    /// Owner for data calls: the username, or [`FALLBACK_STUDENT_ID`].
    pub fn student_id(&self) -> &str {
        self.username().unwrap_or(FALLBACK_STUDENT_ID)
    }
}

/// Reads and writes the session keys.
#[derive(Debug, Clone)]
pub struct SessionService<S> {
    store: S,
}

impl<S: KeyValueStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide the initial state from storage.
    pub fn restore(&self) -> SessionState {
        let logged_in = self.store.get(keys::IS_LOGGED_IN).as_deref() == Some("true");
        let username = self
            .store
            .get(keys::USERNAME)
            .filter(|name| !name.trim().is_empty());

        match (logged_in, username) {
            (true, Some(username)) => {
                tracing::debug!(%username, "restored session");
                SessionState::Authenticated(Session {
                    username,
                    token: self.store.get(keys::AUTH_TOKEN),
                })
            }
            _ => SessionState::Anonymous,
        }
    }

    /// Persist a successful login.
    pub fn login(&self, user: &UserInfo, token: Option<String>) -> SessionState {
        if let Some(token) = &token {
            self.store.set(keys::AUTH_TOKEN, token);
        }
        self.store.set(keys::USERNAME, &user.username);
        self.store.set(keys::IS_LOGGED_IN, "true");
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(keys::USER, &json),
            Err(e) => tracing::warn!(error = %e, "could not serialise user record"),
        }
        tracing::info!(username = %user.username, "logged in");

        SessionState::Authenticated(Session {
            username: user.username.clone(),
            token,
        })
    }

    pub fn logout(&self) -> SessionState {
        for key in keys::SESSION_KEYS {
            self.store.remove(key);
        }
        tracing::info!("logged out");
        SessionState::Anonymous
    }

    /// The stored user record, if any.
    pub fn user(&self) -> Option<UserInfo> {
        let json = self.store.get(keys::USER)?;
        serde_json::from_str(&json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn user(name: &str) -> UserInfo {
        UserInfo {
            id: Some(7),
            username: name.to_string(),
            email: Some(format!("{name}@uni.edu")),
        }
    }

    #[test]
    fn test_restore_empty_is_anonymous() {
        let service = SessionService::new(MemoryStore::new());
        assert_eq!(service.restore(), SessionState::Anonymous);
        assert_eq!(service.restore().student_id(), FALLBACK_STUDENT_ID);
    }

    #[test]
    fn test_login_restore_logout_round_trip() {
        let store = MemoryStore::new();
        let service = SessionService::new(store.clone());

        let state = service.login(&user("kop"), Some("t0k3n".into()));
        assert!(state.is_authenticated());
        assert_eq!(store.get(keys::IS_LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(store.get(keys::AUTH_TOKEN).as_deref(), Some("t0k3n"));

        // A fresh service over the same storage sees the same session
        let restored = SessionService::new(store.clone()).restore();
        assert_eq!(restored, state);
        assert_eq!(restored.student_id(), "kop");
        assert_eq!(service.user(), Some(user("kop")));

        assert_eq!(service.logout(), SessionState::Anonymous);
        assert!(store.is_empty());
        assert_eq!(service.restore(), SessionState::Anonymous);
    }

    #[test]
    fn test_token_is_optional() {
        let store = MemoryStore::new();
        let service = SessionService::new(&store);

        let state = service.login(&user("kop"), None);
        assert!(store.get(keys::AUTH_TOKEN).is_none());
        assert_eq!(
            service.restore(),
            SessionState::Authenticated(Session {
                username: "kop".into(),
                token: None,
            })
        );
        assert_eq!(state, service.restore());
    }

    #[test]
    fn test_flag_without_username_is_anonymous() {
        let store = MemoryStore::new();
        store.set(keys::IS_LOGGED_IN, "true");
        store.set(keys::USERNAME, "  ");
        assert_eq!(SessionService::new(&store).restore(), SessionState::Anonymous);

        store.set(keys::USERNAME, "kop");
        store.set(keys::IS_LOGGED_IN, "false");
        assert_eq!(SessionService::new(&store).restore(), SessionState::Anonymous);
    }

    #[test]
    fn test_unknown_is_not_authenticated() {
        assert!(!SessionState::Unknown.is_authenticated());
        assert_eq!(SessionState::default(), SessionState::Unknown);
    }
}
