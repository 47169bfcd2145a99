//! Durable storage for the user's language preference.
//!
//! `FileStore` keeps a small JSON object of string values on disk, the same
//! shape a browser's localStorage exposes. The active language lives under
//! [`LANGUAGE_KEY`].

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Storage key holding the active language code.
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access preference file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file {} is not a JSON object of strings: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value storage that survives restarts.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Non-durable store, for tests and hosts without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a language preference.
    pub fn with_language(code: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(LANGUAGE_KEY.to_string(), code.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Sibling file the new contents are written to before replacing the original.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read every stored value. A missing file is an empty store.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(e @ StorageError::Json { .. }) => {
                warn!("Discarding unreadable preferences: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json =
            serde_json::to_string_pretty(&values).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;

        // Readers see either the old file or the complete new one
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, json).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }
        debug!("Stored preference '{}' in {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(LANGUAGE_KEY).unwrap(), None);

        store.set(LANGUAGE_KEY, "pl").unwrap();
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pl"));
    }

    #[test]
    fn test_memory_store_with_language() {
        let store = MemoryStore::with_language("pl");
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pl"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("prefs.json"));
        assert_eq!(store.get(LANGUAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_set_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("prefs.json");
        let mut store = FileStore::new(&path);

        store.set(LANGUAGE_KEY, "pl").expect("Should write preference");

        assert!(path.exists());
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pl"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        FileStore::new(&path).set(LANGUAGE_KEY, "pl").unwrap();
        let reopened = FileStore::new(&path);

        assert_eq!(reopened.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pl"));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let mut store = FileStore::new(&path);
        store.set(LANGUAGE_KEY, "en").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("prefs.json"));

        store.set(LANGUAGE_KEY, "pl").unwrap();
        store.set(LANGUAGE_KEY, "en").unwrap();

        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_file_store_blank_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "  \n").unwrap();

        assert_eq!(FileStore::new(&path).get(LANGUAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStore::new(&path).get(LANGUAGE_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_file_store_set_repairs_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let mut store = FileStore::new(&path);
        store.set(LANGUAGE_KEY, "pl").expect("Should overwrite corrupt file");

        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pl"));
    }

    #[test]
    fn test_file_store_set_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        let mut store = FileStore::new(&path);

        store.set(LANGUAGE_KEY, "pl").unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("prefs.json")]);
    }

    #[test]
    fn test_file_store_temp_path_is_sibling() {
        let store = FileStore::new("data/preferences.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/preferences.json.tmp"));
    }
}
