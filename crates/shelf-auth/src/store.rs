//! File-backed key/value store.
//!
//! Mirrors browser local storage: string keys, string values, one JSON
//! object on disk. Every write is flushed immediately.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::AuthError;

/// File name used under the data directory.
pub const STORE_FILE_NAME: &str = "local-storage.json";

/// Persistent string key/value map.
#[derive(Debug, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// An unreadable or corrupt file is treated as empty and rewritten on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding corrupt local store");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened local store");
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// `$HOME/.local/share/shelf/local-storage.json`, or a relative
    /// `.shelf/` directory when no home is set.
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local").join("share").join("shelf"))
            .unwrap_or_else(|| PathBuf::from(".shelf"));
        base.join(STORE_FILE_NAME)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) -> Result<(), AuthError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// Remove a key. Removing a missing key is not an error.
    pub fn remove(&mut self, key: &str) -> Result<(), AuthError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Read a JSON-encoded value. A value that fails to decode reads as
    /// `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "undecodable store value");
                None
            }
        }
    }

    /// Store a value JSON-encoded.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AuthError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn flush(&self) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);

        let mut store = LocalStore::open(&path).unwrap();
        store.set_raw("isAdminAuthenticated", "true").unwrap();
        store.set("count", &3u32).unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.get_raw("isAdminAuthenticated"), Some("true"));
        assert_eq!(reopened.get::<u32>("count"), Some(3));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);

        let mut store = LocalStore::open(&path).unwrap();
        store.set_raw("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("missing").unwrap();

        assert!(!LocalStore::open(&path).unwrap().contains("a"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.keys().count(), 0);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = LocalStore::in_memory();
        store.set_raw("k", "v").unwrap();
        assert_eq!(store.get_raw("k"), Some("v"));
        assert!(store.path().is_none());
        assert_eq!(store.get::<u32>("k"), None);
    }
}
