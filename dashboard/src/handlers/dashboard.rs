//! HTTP handlers for the weather dashboard

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{AdvisoryCard, City, GeoPoint};
use validator::Validate;

use crate::error::AppResult;
use crate::external::ClimateApi;
use crate::services::dashboard::DashboardView;
use crate::AppState;

/// Request to load a city directly, bypassing the navigator
#[derive(Debug, Deserialize, Validate)]
pub struct LoadLocationRequest {
    #[validate(length(max = 100, message = "City name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "Country must be at most 100 characters"))]
    pub country: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl LoadLocationRequest {
    fn into_city(self) -> City {
        let mut city = City::new(self.name);
        city.country = self.country;
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            city.coordinates = Some(GeoPoint::new(latitude, longitude));
        }
        city
    }
}

#[derive(Debug, Serialize)]
pub struct AdvisoriesResponse {
    pub city: Option<City>,
    pub aqi: Option<u32>,
    pub uv_index: Option<f64>,
    pub advisories: Vec<AdvisoryCard>,
}

/// Get the dashboard view
pub async fn get_dashboard<C: ClimateApi>(State(state): State<AppState<C>>) -> Json<DashboardView> {
    Json(state.dashboard.view())
}

/// Load a city. Validation and upstream failures land in the view's error.
pub async fn load_dashboard<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(input): Json<LoadLocationRequest>,
) -> AppResult<Json<DashboardView>> {
    input.validate()?;
    let city = input.into_city();

    if city.coordinates.is_some() {
        if let Err(err) = state.history.record(&city).await {
            tracing::warn!(city = %city.name, error = %err, "Could not record search");
        }
    }

    Ok(Json(state.dashboard.load_location(city).await))
}

/// Manually retry the last load
pub async fn retry_dashboard<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> AppResult<Json<DashboardView>> {
    let view = state.dashboard.retry().await?;
    Ok(Json(view))
}

/// Advisory cards for the loaded city, enriched with AQI and UV when available
pub async fn get_advisories<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> Json<AdvisoriesResponse> {
    let view = state.dashboard.view();
    let point = view
        .city
        .as_ref()
        .and_then(|city| city.coordinates)
        .filter(|_| view.climate_data.is_some());

    let (aqi, uv_index) = match point {
        Some(point) => {
            tokio::join!(
                state.widgets.air_quality_index(point),
                state.widgets.uv_index(point)
            )
        }
        None => (None, None),
    };

    Json(AdvisoriesResponse {
        advisories: state.dashboard.advisories(aqi, uv_index),
        city: view.city,
        aqi,
        uv_index,
    })
}
