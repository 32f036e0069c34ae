//! In-memory storage backend for tests.

use std::collections::HashMap;

use super::KeyValueStorage;

/// A HashMap-backed [`KeyValueStorage`] with no durability.
///
/// Used by tests to exercise the stores without touching the filesystem,
/// and to simulate "reload" by constructing new stores over the same
/// storage handle.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("missing"), None);

        storage.set("cart_guest", "[]");
        assert_eq!(storage.get("cart_guest"), Some("[]".to_string()));

        storage.set("cart_guest", "{}");
        assert_eq!(storage.get("cart_guest"), Some("{}".to_string()));

        storage.remove("cart_guest");
        assert_eq!(storage.get("cart_guest"), None);

        // removing again is a no-op
        storage.remove("cart_guest");
    }
}
