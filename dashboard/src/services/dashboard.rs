//! Dashboard orchestration: loads a city's current conditions and forecast
//!
//! Current weather is required; the forecast is best-effort and its
//! failure never reaches the view's error state. Only the primary request
//! is bounded by the configured timeout. Each load takes a new generation
//! number and results from an older generation are dropped.

use serde::Serialize;
use shared::advisories::compute_advisories;
use shared::validation::{validate_city, INVALID_CITY};
use shared::{AdvisoryCard, City, ForecastSeries, WeatherSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::external::climate_api::{self, ClimateApi};

/// Everything the dashboard view renders
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardView {
    pub loading: bool,
    /// Last requested city, the target of a manual retry
    pub city: Option<City>,
    pub climate_data: Option<WeatherSnapshot>,
    pub forecast_data: Option<ForecastSeries>,
    pub error: Option<ViewError>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewError {
    pub message: String,
    /// Whether a retry button makes sense
    pub retryable: bool,
}

#[derive(Debug, Default)]
struct DashboardState {
    view: DashboardView,
    generation: u64,
}

/// Dashboard orchestrator
pub struct DashboardService<C> {
    api: Arc<C>,
    state: Arc<Mutex<DashboardState>>,
    timeout: Duration,
}

impl<C> Clone for DashboardService<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            timeout: self.timeout,
        }
    }
}

/// Clears the loading flag when a load finishes, however it finishes,
/// unless a newer load has taken over.
struct LoadingGuard<'a> {
    state: &'a Mutex<DashboardState>,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation {
            state.view.loading = false;
        }
    }
}

impl<C: ClimateApi> DashboardService<C> {
    pub fn new(api: Arc<C>, timeout: Duration) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DashboardState::default())),
            timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current view state
    pub fn view(&self) -> DashboardView {
        self.lock().view.clone()
    }

    /// Load current conditions, then the forecast, for a city
    pub async fn load_location(&self, city: City) -> DashboardView {
        if let Err(reason) = validate_city(&city) {
            tracing::warn!(city = %city.name, reason, "Rejected city before loading");
            // Supersedes any load still in flight; completed data stays
            let mut state = self.lock();
            state.generation += 1;
            state.view.loading = false;
            state.view.error = Some(ViewError {
                message: INVALID_CITY.to_string(),
                retryable: false,
            });
            return state.view.clone();
        }

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.view = DashboardView {
                loading: true,
                city: Some(city.clone()),
                ..Default::default()
            };
            state.generation
        };

        {
            let _loading = LoadingGuard {
                state: &self.state,
                generation,
            };
            self.fetch_into_view(&city, generation).await;
        }

        self.view()
    }

    /// Re-run the last load. There is no automatic retry.
    pub async fn retry(&self) -> AppResult<DashboardView> {
        let city = self.lock().view.city.clone().ok_or(AppError::NoRetryTarget)?;
        tracing::info!(city = %city.name, "Retrying dashboard load");
        Ok(self.load_location(city).await)
    }

    /// Advisory cards for the loaded conditions
    pub fn advisories(&self, aqi: Option<u32>, uv_index: Option<f64>) -> Vec<AdvisoryCard> {
        self.lock()
            .view
            .climate_data
            .as_ref()
            .map(|weather| compute_advisories(weather, aqi, uv_index))
            .unwrap_or_default()
    }

    async fn fetch_into_view(&self, city: &City, generation: u64) {
        let primary =
            tokio::time::timeout(self.timeout, climate_api::current_by_city(&*self.api, city)).await;

        let snapshot = match primary {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(err)) => {
                tracing::error!(city = %city.name, error = %err, "Current weather failed");
                self.apply(generation, |view| view.error = Some(view_error(&err)));
                return;
            }
            Err(_) => {
                let err = AppError::Timeout(self.timeout.as_secs());
                tracing::error!(city = %city.name, error = %err, "Current weather timed out");
                self.apply(generation, |view| view.error = Some(view_error(&err)));
                return;
            }
        };

        if !self.apply(generation, |view| view.climate_data = Some(snapshot)) {
            return;
        }
        tracing::info!(city = %city.name, "Current weather loaded");

        let Some(point) = city.coordinates else {
            return;
        };
        match climate_api::forecast(&*self.api, &point).await {
            Ok(series) => {
                tracing::debug!(city = %city.name, entries = series.len(), "Forecast loaded");
                self.apply(generation, |view| view.forecast_data = Some(series));
            }
            Err(err) => {
                tracing::warn!(city = %city.name, error = %err, "Forecast unavailable");
            }
        }
    }

    /// Apply a change if `generation` is still the latest load.
    /// Returns false when the result was stale and dropped.
    fn apply(&self, generation: u64, change: impl FnOnce(&mut DashboardView)) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(generation, latest = state.generation, "Dropping stale result");
            return false;
        }
        change(&mut state.view);
        true
    }
}

fn view_error(err: &AppError) -> ViewError {
    ViewError {
        message: err.user_message(),
        retryable: true,
    }
}
