//! HTTP handlers for multi-location comparison

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::external::ClimateApi;
use crate::services::comparison::{AddOutcome, ComparisonSnapshot};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddComparisonRequest {
    #[validate(length(max = 100, message = "City name must be at most 100 characters"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveComparisonResponse {
    pub removed: bool,
}

/// Get the compared locations and their table
pub async fn get_comparison<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> Json<ComparisonSnapshot> {
    Json(state.comparison.snapshot())
}

/// Add a location by name. Blank names and a full set are no-ops.
pub async fn add_comparison_location<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(input): Json<AddComparisonRequest>,
) -> AppResult<Json<AddOutcome>> {
    input.validate()?;
    let outcome = state.comparison.add_location(&input.name).await?;
    Ok(Json(outcome))
}

/// Remove one location. Unknown ids are a no-op.
pub async fn remove_comparison_location<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Path(id): Path<i64>,
) -> Json<RemoveComparisonResponse> {
    Json(RemoveComparisonResponse {
        removed: state.comparison.remove_location(id),
    })
}

pub async fn clear_comparison<C: ClimateApi>(State(state): State<AppState<C>>) -> StatusCode {
    state.comparison.clear_all();
    StatusCode::NO_CONTENT
}
