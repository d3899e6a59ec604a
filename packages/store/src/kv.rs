//! # Key/value storage: the durable half of the client session
//!
//! The browser front end keeps a handful of string values across reloads: the
//! login flag, the username, an optional token and the serialised user record.
//! [`KeyValueStore`] is the seam every backend implements so the session logic
//! in the `api` crate never touches `localStorage` directly.
//!
//! ## Backends
//!
//! | Type | Platform | Persistence |
//! |------|----------|-------------|
//! | [`crate::MemoryStore`] | any | process lifetime (tests, fallback) |
//! | [`crate::FileStore`] | native | one file per key under a base directory |
//! | `LocalStorage` | wasm + `web` feature | `window.localStorage` |
//!
//! Reads return `None` for missing keys and writes never fail loudly: a broken
//! storage degrades to "nothing stored", which the session layer treats as an
//! anonymous user.

/// Synchronous string key/value storage.
///
/// Synchronous on purpose: `localStorage` is synchronous, and the session
/// restore runs before the first render.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Storage key names read and written by the browser client.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USERNAME: &str = "username";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const USER: &str = "user";
    /// Optional TOML override for [`crate::TrackerConfig`].
    pub const TRACKER_CONFIG: &str = "trackerConfig";

    /// Keys cleared on logout.
    pub const SESSION_KEYS: [&str; 4] = [AUTH_TOKEN, USERNAME, IS_LOGGED_IN, USER];
}
