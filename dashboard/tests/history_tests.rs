//! Persistence integration tests
//!
//! Tests for the file-backed store including:
//! - Search history ordering, dedup and cap
//! - Corrupt history reading as empty
//! - Theme preference surviving a restart
//! - Concurrent records all landing

use climate_dashboard::error::AppError;
use climate_dashboard::services::{HistoryService, PreferenceService};
use climate_dashboard::store::FileStore;
use proptest::prelude::*;
use shared::history::{HISTORY_KEY, MAX_HISTORY_ENTRIES};
use shared::storage::KeyValueStore;
use shared::{City, GeoPoint, ThemePreference};
use std::path::PathBuf;
use std::sync::Arc;

struct TempStore {
    path: PathBuf,
}

impl TempStore {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "climate-dashboard-history-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Self {
            path: dir.join("store.json"),
        }
    }

    fn open(&self) -> Arc<FileStore> {
        Arc::new(FileStore::new(&self.path))
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        if let Some(dir) = self.path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

fn city(name: &str, lat: i64, lon: i64) -> City {
    City::new(name).with_coordinates(GeoPoint::from_scaled(lat, lon))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_newest_first_without_duplicates() {
        let temp = TempStore::new("order");
        let history = HistoryService::new(temp.open());

        history.record(&city("Paris", 488566, 23522)).await.unwrap();
        history.record(&city("Berlin", 525200, 134050)).await.unwrap();
        let list = history.record(&city("Paris again", 488566, 23522)).await.unwrap();

        let names: Vec<_> = list.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Paris again", "Berlin"]);
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let temp = TempStore::new("reopen");
        HistoryService::new(temp.open())
            .record(&city("Nairobi", -12921, 368219))
            .await
            .unwrap();

        let reopened = HistoryService::new(temp.open()).list().await.unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.entries()[0].name, "Nairobi");
    }

    #[tokio::test]
    async fn test_city_without_coordinates_rejected() {
        let temp = TempStore::new("nocoords");
        let history = HistoryService::new(temp.open());

        let result = history.record(&City::new("Atlantis")).await;
        assert!(matches!(result, Err(AppError::InvalidCity(_))));
        assert!(history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_history_reads_empty() {
        let temp = TempStore::new("corrupt");
        let store = temp.open();
        store.set(HISTORY_KEY, "{not an array").unwrap();

        let history = HistoryService::new(store);
        assert!(history.list().await.unwrap().is_empty());

        let list = history.record(&city("Lima", -120464, -770428)).await.unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let temp = TempStore::new("clear");
        let history = HistoryService::new(temp.open());
        history.record(&city("Sydney", -338688, 1512093)).await.unwrap();

        history.clear().await.unwrap();
        assert!(history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_theme_defaults_and_persists() {
        let temp = TempStore::new("theme");
        let preferences = PreferenceService::new(temp.open());
        assert_eq!(preferences.theme().await.unwrap(), ThemePreference::Auto);

        preferences.set_theme(ThemePreference::Dark).await.unwrap();

        let reopened = PreferenceService::new(temp.open());
        assert_eq!(reopened.theme().await.unwrap(), ThemePreference::Dark);
    }

    #[tokio::test]
    async fn test_history_and_theme_share_store() {
        let temp = TempStore::new("shared");
        let store = temp.open();
        PreferenceService::new(store.clone())
            .set_theme(ThemePreference::Light)
            .await
            .unwrap();
        HistoryService::new(store.clone())
            .record(&city("Cairo", 300444, 312357))
            .await
            .unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert!(store.get(HISTORY_KEY).unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_all_land() {
        let temp = TempStore::new("concurrent");
        let history = HistoryService::new(temp.open());

        let tasks: Vec<_> = (0..10)
            .map(|i| {
                let history = history.clone();
                tokio::spawn(async move {
                    history
                        .record(&city(&format!("City {}", i), 100000 + i, 200000 + i))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let list = history.list().await.unwrap();
        assert_eq!(list.len(), 10);
        let mut names: Vec<_> = list.entries().iter().map(|e| e.name.clone()).collect();
        names.sort();
        let mut expected: Vec<_> = (0..10).map(|i| format!("City {}", i)).collect();
        expected.sort();
        assert_eq!(names, expected);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// History never exceeds the cap and never holds the same coordinates twice
    #[test]
    fn prop_history_capped_and_unique(points in prop::collection::vec((-900000i64..900000, -1800000i64..1800000), 1..30)) {
        let temp = TempStore::new("prop");
        let history = HistoryService::new(temp.open());
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let list = runtime.block_on(async {
            for (i, (lat, lon)) in points.iter().enumerate() {
                history.record(&city(&format!("City {}", i), *lat, *lon)).await.unwrap();
            }
            history.list().await.unwrap()
        });
        prop_assert!(list.len() <= MAX_HISTORY_ENTRIES);
        let mut seen = std::collections::HashSet::new();
        for entry in list.entries() {
            prop_assert!(seen.insert(entry.coordinates));
        }
        let (lat, lon) = points[points.len() - 1];
        prop_assert_eq!(list.entries()[0].coordinates, GeoPoint::from_scaled(lat, lon));
    }
}
