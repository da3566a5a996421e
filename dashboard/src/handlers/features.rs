//! HTTP handler for climate feature cards

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::features::{self, FeatureCard, FeatureKind};

use crate::error::{AppError, AppResult};
use crate::external::ClimateApi;
use crate::AppState;

const FALLBACK_LOCATION: &str = "Global";

#[derive(Debug, Deserialize)]
pub struct FeatureQuery {
    pub location: Option<String>,
}

/// Feature card for a location. Without `location` the loaded dashboard
/// city is used.
pub async fn get_feature_card<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Path(kind): Path<String>,
    Query(query): Query<FeatureQuery>,
) -> AppResult<Json<FeatureCard>> {
    let kind: FeatureKind = kind.parse().map_err(AppError::NotFound)?;
    let location = query
        .location
        .filter(|l| !l.trim().is_empty())
        .or_else(|| state.dashboard.view().city.map(|c| c.name))
        .unwrap_or_else(|| FALLBACK_LOCATION.to_string());

    Ok(Json(features::generate(kind, &location)))
}
