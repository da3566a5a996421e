//! Search history and theme preference, persisted in the key/value store
//!
//! Store access is blocking file I/O, so every call runs on tokio's
//! blocking pool.

use chrono::Utc;
use shared::history::{HistoryEntry, SearchHistory};
use shared::storage::{self, KeyValueStore, StorageError};
use shared::{City, ThemePreference};
use std::sync::Arc;

use crate::error::{AppError, AppResult};

pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

async fn with_store<T, F>(store: &SharedStore, work: F) -> AppResult<T>
where
    F: FnOnce(&(dyn KeyValueStore + Send + Sync)) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || work(&*store))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;
    Ok(result?)
}

#[derive(Clone)]
pub struct HistoryService {
    store: SharedStore,
}

impl HistoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<SearchHistory> {
        with_store(&self.store, |store| SearchHistory::load(store)).await
    }

    /// Record a searched city. Cities without coordinates are rejected.
    pub async fn record(&self, city: &City) -> AppResult<SearchHistory> {
        let entry = HistoryEntry::from_city(city, Utc::now()).ok_or_else(|| {
            AppError::InvalidCity(format!("{} has no coordinates", city.name))
        })?;
        let history = with_store(&self.store, move |store| {
            shared::history::record_search(store, entry)
        })
        .await?;
        tracing::debug!(city = %city.name, entries = history.len(), "Recorded search");
        Ok(history)
    }

    pub async fn clear(&self) -> AppResult<()> {
        with_store(&self.store, |store| SearchHistory::new().save(store)).await
    }
}

#[derive(Clone)]
pub struct PreferenceService {
    store: SharedStore,
}

impl PreferenceService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn theme(&self) -> AppResult<ThemePreference> {
        with_store(&self.store, |store| storage::load_theme(store)).await
    }

    pub async fn set_theme(&self, theme: ThemePreference) -> AppResult<ThemePreference> {
        with_store(&self.store, move |store| storage::save_theme(store, theme)).await?;
        tracing::info!(%theme, "Theme preference saved");
        Ok(theme)
    }
}
