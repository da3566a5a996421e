//! HTTP handlers for the location search history

use axum::{extract::State, http::StatusCode, Json};
use shared::history::SearchHistory;
use shared::City;

use crate::error::AppResult;
use crate::external::ClimateApi;
use crate::AppState;

/// List recent searches, newest first
pub async fn list_history<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> AppResult<Json<SearchHistory>> {
    Ok(Json(state.history.list().await?))
}

/// Record a located city
pub async fn record_history<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(city): Json<City>,
) -> AppResult<Json<SearchHistory>> {
    Ok(Json(state.history.record(&city).await?))
}

pub async fn clear_history<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> AppResult<StatusCode> {
    state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
