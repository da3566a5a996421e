//! Location search history
//!
//! Newest first, at most [`MAX_HISTORY_ENTRIES`], one entry per coordinate
//! pair. Stored as a JSON array under [`HISTORY_KEY`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError};
use crate::types::{City, GeoPoint};

pub const HISTORY_KEY: &str = "location_search_history";
pub const MAX_HISTORY_ENTRIES: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub coordinates: GeoPoint,
    pub searched_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// History only holds located cities
    pub fn from_city(city: &City, searched_at: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            name: city.name.clone(),
            country: city.country.clone(),
            coordinates: city.coordinates?,
            searched_at,
        })
    }

    pub fn to_city(&self) -> City {
        City {
            name: self.name.clone(),
            country: self.country.clone(),
            coordinates: Some(self.coordinates),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put an entry at the front, replacing any entry with the same
    /// coordinates and dropping the oldest beyond the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.coordinates != entry.coordinates);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Parse a stored JSON array. Anything unreadable yields empty history.
    pub fn from_json(raw: &str) -> Self {
        let mut history: Self = serde_json::from_str(raw).unwrap_or_default();
        history.entries.truncate(MAX_HISTORY_ENTRIES);
        history
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        Ok(store
            .get(HISTORY_KEY)?
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default())
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StorageError> {
        store.set(HISTORY_KEY, &self.to_json()?)
    }
}

/// Load, record and save as one store update
pub fn record_search<S: KeyValueStore + ?Sized>(
    store: &S,
    entry: HistoryEntry,
) -> Result<SearchHistory, StorageError> {
    let mut recorded = SearchHistory::new();
    store.update(HISTORY_KEY, &mut |raw| {
        let mut history = raw.map(|raw| SearchHistory::from_json(&raw)).unwrap_or_default();
        history.record(entry.clone());
        let json = history.to_json()?;
        recorded = history;
        Ok(Some(json))
    })?;
    Ok(recorded)
}
