//! File-backed key/value store
//!
//! Holds the search history and theme preference between server restarts.
//! The whole store is a single JSON object of string values, read on every
//! access and rewritten on every change. Writes go to a sibling temp file
//! that is renamed over the store, so readers never see a partial file.

use shared::storage::{KeyValueStore, StorageError, UpdateFn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// All writes funnel through here, one at a time
    fn modify(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all()?;
        change(&mut values)?;
        self.write_all(&values)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|values| {
            values.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|values| {
            values.remove(key);
            Ok(())
        })
    }

    fn update(&self, key: &str, change: &mut UpdateFn<'_>) -> Result<(), StorageError> {
        self.modify(|values| {
            if let Some(value) = change(values.remove(key))? {
                values.insert(key.to_string(), value);
            }
            Ok(())
        })
    }
}
