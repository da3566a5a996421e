//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::external::ClimateApi;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub climate_api: String,
}

/// Health check endpoint handler
pub async fn health_check<C: ClimateApi>(State(state): State<AppState<C>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        climate_api: state.config.climate_api.base_url.clone(),
    })
}
