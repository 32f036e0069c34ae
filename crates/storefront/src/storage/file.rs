//! JSON-file storage backend.
//!
//! The durable analog of browser localStorage: one JSON object per store,
//! loaded whole at open and rewritten whole on every mutation. Write-through
//! keeps the file the source of truth on reload, matching the contract that
//! every store mutation is immediately durable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::KeyValueStorage;

/// A [`KeyValueStorage`] persisted as a single JSON object file.
///
/// Read failures (missing file, malformed JSON) degrade to an empty map;
/// the corrupt file is overwritten on the next write. Write failures are
/// logged and swallowed so a full disk cannot crash the storefront.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open (or create) the store backed by `path`.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Err(error) = self.try_flush() {
            warn!(path = %self.path.display(), %error, "failed to persist storage file");
        }
    }

    fn try_flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read storage file, starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(path = %path.display(), %error, "malformed storage file, starting empty");
            BTreeMap::new()
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");

        {
            let mut storage = JsonFileStorage::open(&path);
            storage.set("user", r#"{"id":1}"#);
            storage.set("cart_guest", r#"{"items":[]}"#);
            storage.remove("user");
        }

        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("user"), None);
        assert_eq!(storage.get("cart_guest"), Some(r#"{"items":[]}"#.to_string()));
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::open(dir.path().join("absent.json"));
        assert_eq!(storage.get("anything"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_recovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "{{{ not json").expect("write corrupt file");

        let mut storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("user"), None);

        // The next write replaces the corrupt file with valid JSON.
        storage.set("user", "ok");
        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("user"), Some("ok".to_string()));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deep").join("storage.json");

        let mut storage = JsonFileStorage::open(&path);
        storage.set("k", "v");

        assert!(path.exists());
    }
}
