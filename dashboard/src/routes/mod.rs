//! Route definitions for the Climate Dashboard

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{external::ClimateApi, handlers, AppState};

/// Create API routes
pub fn api_routes<C: ClimateApi>() -> Router<AppState<C>> {
    Router::new()
        .route("/health", get(handlers::health_check::<C>))
        // Location picker
        .nest("/navigator", navigator_routes())
        // Weather dashboard
        .nest("/dashboard", dashboard_routes())
        // Multi-location comparison
        .nest("/comparison", comparison_routes())
        // Widgets
        .route("/widgets/:kind", get(handlers::get_widget::<C>))
        // Search history
        .route(
            "/history",
            get(handlers::list_history::<C>)
                .post(handlers::record_history::<C>)
                .delete(handlers::clear_history::<C>),
        )
        // Preferences
        .route(
            "/preferences/theme",
            get(handlers::get_theme::<C>).put(handlers::update_theme::<C>),
        )
        // Feature cards
        .route("/features/:kind", get(handlers::get_feature_card::<C>))
        // Derived metric lookups
        .nest("/metrics", metrics_routes())
}

fn navigator_routes<C: ClimateApi>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(handlers::get_navigator::<C>))
        .route("/select", post(handlers::select_location::<C>))
        .route("/back", post(handlers::navigate_back::<C>))
        .route("/jump", post(handlers::jump_to_step::<C>))
}

fn dashboard_routes<C: ClimateApi>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(handlers::get_dashboard::<C>))
        .route("/load", post(handlers::load_dashboard::<C>))
        .route("/retry", post(handlers::retry_dashboard::<C>))
        .route("/advisories", get(handlers::get_advisories::<C>))
}

fn comparison_routes<C: ClimateApi>() -> Router<AppState<C>> {
    Router::new()
        .route(
            "/",
            get(handlers::get_comparison::<C>)
                .post(handlers::add_comparison_location::<C>)
                .delete(handlers::clear_comparison::<C>),
        )
        .route("/:id", delete(handlers::remove_comparison_location::<C>))
}

fn metrics_routes<C: ClimateApi>() -> Router<AppState<C>> {
    Router::new()
        .route("/aqi/:value", get(handlers::get_aqi_info))
        .route("/uv/:value", get(handlers::get_uv_info))
        .route("/magnitude/:value", get(handlers::get_magnitude_info))
}
