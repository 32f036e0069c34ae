//! Durable key/value storage port.
//!
//! The stores never talk to the filesystem directly; they go through
//! [`KeyValueStorage`], which mirrors the browser localStorage contract
//! (string keys, string values, synchronous access, single writer).
//! Production code uses [`JsonFileStorage`]; tests substitute
//! [`MemoryStorage`].
//!
//! Corrupt or unreadable durable state is never an error at this layer:
//! readers degrade to "absent" and the next write overwrites the bad entry.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use std::sync::{Arc, Mutex, MutexGuard};

/// Synchronous string key/value storage.
///
/// Only one logical writer exists at a time (single tab/process), so no
/// internal locking discipline is required of implementations; sharing is
/// handled by [`SharedStorage`].
pub trait KeyValueStorage: Send {
    /// Read the value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete `key`. No-op if absent.
    fn remove(&mut self, key: &str);
}

/// A storage handle shared between the session and cart stores.
#[derive(Clone)]
pub struct SharedStorage {
    inner: Arc<Mutex<dyn KeyValueStorage>>,
}

impl SharedStorage {
    /// Wrap a storage backend for sharing.
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(storage)),
        }
    }

    /// Lock the underlying backend.
    ///
    /// A poisoned lock is recovered rather than propagated: the panicking
    /// writer held only in-memory map state, which stays usable.
    fn lock(&self) -> MutexGuard<'_, dyn KeyValueStorage + 'static> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Read the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    /// Write `value` under `key`.
    pub fn set(&self, key: &str, value: &str) {
        self.lock().set(key, value);
    }

    /// Delete `key`.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// Storage keys for session data. Cart keys come from
/// [`OwnerKey::storage_key`](crate::models::OwnerKey::storage_key).
pub mod keys {
    /// Key for the current logged-in identity (full JSON record).
    pub const CURRENT_USER: &str = "user";

    /// Key for the authenticated-session marker.
    pub const IS_AUTHENTICATED: &str = "is_authenticated";

    /// Key for the session start timestamp (UTC milliseconds).
    pub const SESSION_START: &str = "session_start";

    /// Key for the set of registered (non-seed) identities.
    pub const REGISTERED_USERS: &str = "registered_users";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_storage_is_shared() {
        let a = SharedStorage::new(MemoryStorage::new());
        let b = a.clone();

        a.set("k", "v");
        assert_eq!(b.get("k"), Some("v".to_string()));

        b.remove("k");
        assert_eq!(a.get("k"), None);
    }
}
