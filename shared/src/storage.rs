//! Key/value persistence in the shape of browser `localStorage`

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

use crate::types::ThemePreference;

pub const THEME_KEY: &str = "theme";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read-modify-write step passed to [`KeyValueStore::update`].
/// Returning `None` removes the key.
pub type UpdateFn<'a> = dyn FnMut(Option<String>) -> Result<Option<String>, StorageError> + 'a;

/// String key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Replace one value based on its current content. Stores shared
    /// between threads override this so no other write lands in between.
    fn update(&self, key: &str, change: &mut UpdateFn<'_>) -> Result<(), StorageError> {
        match change(self.get(key)?)? {
            Some(value) => self.set(key, &value),
            None => self.remove(key),
        }
    }
}

/// In-process store, used when nothing needs to outlive the session
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }

    fn update(&self, key: &str, change: &mut UpdateFn<'_>) -> Result<(), StorageError> {
        let mut values = self.values();
        match change(values.get(key).cloned())? {
            Some(value) => values.insert(key.to_string(), value),
            None => values.remove(key),
        };
        Ok(())
    }
}

/// Read the theme preference. Missing or unrecognised values read as `auto`.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Result<ThemePreference, StorageError> {
    Ok(store
        .get(THEME_KEY)?
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default())
}

pub fn save_theme<S: KeyValueStore + ?Sized>(
    store: &S,
    theme: ThemePreference,
) -> Result<(), StorageError> {
    store.set(THEME_KEY, theme.as_str())
}
