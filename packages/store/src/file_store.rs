//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used when the front end runs natively
//! (desktop webview, tests). Each key becomes a file holding the raw value.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── authToken
//! ├── isLoggedIn
//! ├── user
//! └── username
//! ```
//!
//! Use `dirs::data_dir()` joined with `sem-tracker` as the base for a
//! platform-appropriate location.

use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers; strip separators so a key never escapes the base.
        let name: String = key
            .chars()
            .filter(|c| !matches!(c, '/' | '\\' | '.'))
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.key_path(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::keys;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("sem_tracker_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set(keys::USERNAME, "alice");
        store.set(keys::IS_LOGGED_IN, "true");

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get(keys::USERNAME).as_deref(), Some("alice"));
        assert_eq!(reopened.get(keys::IS_LOGGED_IN).as_deref(), Some("true"));

        reopened.remove(keys::USERNAME);
        assert!(store.get(keys::USERNAME).is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_cannot_escape_base() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        assert_eq!(store.key_path("../etc/passwd"), PathBuf::from("/tmp/base/etcpasswd"));
    }
}
