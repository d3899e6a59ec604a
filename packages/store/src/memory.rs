use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::keys;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();

        // Initially empty
        assert!(store.is_empty());
        assert!(store.get(keys::USERNAME).is_none());

        store.set(keys::USERNAME, "alice");
        assert_eq!(store.get(keys::USERNAME).as_deref(), Some("alice"));

        // Overwrite keeps a single entry
        store.set(keys::USERNAME, "bob");
        assert_eq!(store.get(keys::USERNAME).as_deref(), Some("bob"));
        assert_eq!(store.len(), 1);

        store.remove(keys::USERNAME);
        assert!(store.get(keys::USERNAME).is_none());

        // Removing a missing key is a no-op
        store.remove(keys::AUTH_TOKEN);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set(keys::IS_LOGGED_IN, "true");
        assert_eq!(other.get(keys::IS_LOGGED_IN).as_deref(), Some("true"));
    }

    #[test]
    fn test_reference_is_a_store() {
        fn write_through<S: KeyValueStore>(store: S) {
            store.set(keys::USER, "{}");
        }

        let store = MemoryStore::new();
        write_through(&store);
        assert_eq!(store.get(keys::USER).as_deref(), Some("{}"));
    }
}
