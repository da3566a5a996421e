//! Climate Dashboard - session server
//!
//! Holds the location picker, the weather dashboard, the comparison set and
//! the widget fetchers for one browser session, on top of an upstream
//! climate API.

use axum::{routing::get, Router};
use shared::navigator::Navigator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::{ClimateApi, ClimateClient};
use services::history::SharedStore;
use services::{ComparisonService, DashboardService, HistoryService, PreferenceService, WidgetService};

/// Application state shared across handlers
pub struct AppState<C = ClimateClient> {
    pub config: Arc<Config>,
    pub navigator: Arc<Mutex<Navigator>>,
    pub dashboard: DashboardService<C>,
    pub comparison: ComparisonService<C>,
    pub widgets: WidgetService<C>,
    pub history: HistoryService,
    pub preferences: PreferenceService,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            navigator: Arc::clone(&self.navigator),
            dashboard: self.dashboard.clone(),
            comparison: self.comparison.clone(),
            widgets: self.widgets.clone(),
            history: self.history.clone(),
            preferences: self.preferences.clone(),
        }
    }
}

impl<C: ClimateApi> AppState<C> {
    pub fn new(config: Config, api: C, store: SharedStore) -> Self {
        let api = Arc::new(api);
        let timeout = config.climate_api.timeout();
        Self {
            config: Arc::new(config),
            navigator: Arc::new(Mutex::new(Navigator::new())),
            dashboard: DashboardService::new(Arc::clone(&api), timeout),
            comparison: ComparisonService::new(Arc::clone(&api)),
            widgets: WidgetService::new(api),
            history: HistoryService::new(Arc::clone(&store)),
            preferences: PreferenceService::new(store),
        }
    }

    pub fn lock_navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create the application router with all routes and middleware
pub fn create_app<C: ClimateApi>(state: AppState<C>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check::<C>))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Climate Dashboard API v1.0"
}
