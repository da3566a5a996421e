//! Comparison service: side-by-side current conditions for up to four cities

use chrono::Utc;
use serde::Serialize;
use shared::comparison::ComparisonSet;
use shared::{City, ComparisonEntry, ComparisonTable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::AppResult;
use crate::external::climate_api::{self, ClimateApi};

/// Result of an add request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { entry: ComparisonEntry },
    /// Nothing changed; the request was a no-op
    Ignored { reason: IgnoreReason },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    BlankName,
    Full,
    /// The set was cleared while the request was in flight
    Cleared,
}

/// Entries plus the derived table
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSnapshot {
    pub entries: Vec<ComparisonEntry>,
    pub table: ComparisonTable,
}

#[derive(Debug, Default)]
struct ComparisonState {
    set: ComparisonSet,
    /// Bumped by `clear_all`, so in-flight adds started before it are dropped
    epoch: u64,
}

pub struct ComparisonService<C> {
    api: Arc<C>,
    state: Arc<Mutex<ComparisonState>>,
}

impl<C> Clone for ComparisonService<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: ClimateApi> ComparisonService<C> {
    pub fn new(api: Arc<C>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(ComparisonState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ComparisonState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch current conditions for `name` and append it to the set
    pub async fn add_location(&self, name: &str) -> AppResult<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Ignored {
                reason: IgnoreReason::BlankName,
            });
        }

        let epoch = {
            let state = self.lock();
            if state.set.is_full() {
                tracing::debug!(name, "Comparison set full, ignoring add");
                return Ok(AddOutcome::Ignored {
                    reason: IgnoreReason::Full,
                });
            }
            state.epoch
        };

        let data = climate_api::current_by_city(&*self.api, &City::new(name)).await?;

        let mut state = self.lock();
        if state.epoch != epoch {
            tracing::debug!(name, "Comparison cleared during fetch, dropping result");
            return Ok(AddOutcome::Ignored {
                reason: IgnoreReason::Cleared,
            });
        }
        // Capacity is checked again: concurrent adds may have filled the set
        let outcome = match state.set.push(name, data, Utc::now().timestamp_millis()) {
            Some(entry) => AddOutcome::Added {
                entry: entry.clone(),
            },
            None => AddOutcome::Ignored {
                reason: IgnoreReason::Full,
            },
        };
        if matches!(outcome, AddOutcome::Added { .. }) {
            tracing::info!(name, count = state.set.len(), "Comparison location added");
        }
        Ok(outcome)
    }

    /// Remove one entry. Returns whether it existed.
    pub fn remove_location(&self, id: i64) -> bool {
        self.lock().set.remove(id)
    }

    pub fn clear_all(&self) {
        let mut state = self.lock();
        state.set.clear();
        state.epoch += 1;
    }

    pub fn snapshot(&self) -> ComparisonSnapshot {
        let state = self.lock();
        ComparisonSnapshot {
            entries: state.set.entries().to_vec(),
            table: state.set.table(),
        }
    }
}
