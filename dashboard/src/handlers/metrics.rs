//! HTTP handlers for derived metric lookups

use axum::{extract::Path, Json};
use serde::Serialize;
use shared::metrics::{self, AqiInfo, MagnitudeBand, UvInfo};

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct MagnitudeResponse {
    pub magnitude: f64,
    pub band: MagnitudeBand,
    pub label: String,
    pub color: String,
}

fn finite(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::Validation {
            field: field.to_string(),
            message: format!("{} must be a finite number", field),
        })
    }
}

pub async fn get_aqi_info(Path(aqi): Path<u32>) -> Json<AqiInfo> {
    Json(metrics::aqi_info(aqi))
}

pub async fn get_uv_info(Path(uv_index): Path<f64>) -> AppResult<Json<UvInfo>> {
    let uv_index = finite("uv_index", uv_index)?;
    Ok(Json(metrics::uv_info(uv_index)))
}

pub async fn get_magnitude_info(Path(magnitude): Path<f64>) -> AppResult<Json<MagnitudeResponse>> {
    let magnitude = finite("magnitude", magnitude)?;
    let band = metrics::classify_magnitude(magnitude);
    Ok(Json(MagnitudeResponse {
        magnitude,
        band,
        label: band.to_string(),
        color: band.color().to_string(),
    }))
}
