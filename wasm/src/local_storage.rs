//! Browser `localStorage` behind the shared key/value trait

use shared::storage::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub struct LocalStorage {
    storage: Storage,
}

fn unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl LocalStorage {
    /// The window's local storage, if the browser exposes one
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Fails when the quota is exceeded
        self.storage.set_item(key, value).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}
