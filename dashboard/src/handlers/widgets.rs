//! HTTP handler for dashboard widgets

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::validation::validate_coordinates;
use shared::GeoPoint;

use crate::error::{AppError, AppResult};
use crate::external::ClimateApi;
use crate::services::widgets::{WidgetKind, WidgetPanel, WidgetQuery};
use crate::AppState;

/// Query parameters for a widget
#[derive(Debug, Deserialize)]
pub struct WidgetParams {
    pub lat: Decimal,
    pub lon: Decimal,
    /// Earthquake search radius in km
    pub radius: Option<u32>,
    pub min_magnitude: Option<f64>,
}

/// Load one widget. Upstream failures come back as a failed panel.
pub async fn get_widget<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Path(kind): Path<String>,
    Query(params): Query<WidgetParams>,
) -> AppResult<Json<WidgetPanel>> {
    let kind: WidgetKind = kind.parse()?;
    let point = GeoPoint::new(params.lat, params.lon);
    validate_coordinates(&point).map_err(|message| AppError::Validation {
        field: "coordinates".to_string(),
        message: message.to_string(),
    })?;

    let query = WidgetQuery {
        point,
        radius_km: params.radius,
        min_magnitude: params.min_magnitude,
    };
    Ok(Json(state.widgets.panel(kind, query).await))
}
