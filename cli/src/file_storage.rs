//! Session storage in a JSON file, the CLI's stand-in for `localStorage`.

#[cfg(test)]
#[path = "file_storage_test.rs"]
mod file_storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use portal::util::storage::{KeyValueStorage, StorageError};

/// A flat `{"key": "value"}` object, rewritten in full on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = fs::read_to_string(&path)
            .ok()
            .and_then(|text| match serde_json::from_str(&text) {
                Ok(items) => Some(items),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable state file");
                    None
                }
            })
            .unwrap_or_default();
        Self { path, items: Mutex::new(items) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, key: &str, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let fail = |reason: String| StorageError::Write { key: key.to_owned(), reason };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;
        }
        let text = serde_json::to_string_pretty(items).map_err(|e| fail(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| fail(e.to_string()))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        self.write(key, &items)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write(key, &items)
    }
}
