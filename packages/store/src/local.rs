//! # Browser `localStorage` store
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It is a
//! zero-size handle that looks up `window.localStorage` on every call; the
//! browser caches the storage object so the lookup is cheap.
//!
//! All errors are swallowed: private-browsing modes and disabled storage simply
//! behave like an empty store, which the session layer reads as "anonymous".

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
