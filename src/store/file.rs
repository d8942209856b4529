//! JSON File Store
//!
//! A [`KeyValueStore`] persisted as one flat JSON object on disk, the
//! local-storage analog used by the demo binary. Every mutation is
//! flushed synchronously, so process exit at any point leaves a
//! consistent snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::store::{KeyValueStore, StoreError};

/// File-backed key-value store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries.
    ///
    /// A missing file starts an empty store; a malformed file is
    /// recovered as empty with a warning, never a failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "malformed store file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        // BTreeMap<String, String> always serializes.
        let payload = serde_json::to_string_pretty(&self.entries)
            .unwrap_or_else(|_| String::from("{}"));
        fs::write(&self.path, payload).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clue-trail-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_roundtrip_through_file() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("trail-progress", "3").unwrap();
            store.set("trail-answers", r#"{"puzzle-boost":"222"}"#).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("trail-progress").as_deref(), Some("3"));
        assert_eq!(
            store.get("trail-answers").as_deref(),
            Some(r#"{"puzzle-boost":"222"}"#)
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn test_malformed_file_recovers_empty() {
        let path = temp_path("malformed");
        fs::write(&path, "not json {{{").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("trail-progress").is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_remove_persists() {
        let path = temp_path("remove");
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("a", "1").unwrap();
            store.remove("a").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("a").is_none());

        let _ = fs::remove_file(&path);
    }
}
