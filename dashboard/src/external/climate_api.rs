//! Climate API client
//!
//! Every endpoint answers with the `{success, data}` envelope. The client
//! only moves JSON; envelope validation and typing happen in the helpers
//! below so each caller gets a typed result.

use reqwest::Client;
use serde_json::Value;
use shared::envelope;
use shared::{City, ForecastSeries, GeoPoint, WeatherSnapshot};
use std::future::Future;

use crate::error::{AppError, AppResult};

pub const CURRENT_BY_CITY_PATH: &str = "/climate/city";
pub const CURRENT_BY_COORDINATES_PATH: &str = "/climate/coordinates";
pub const FORECAST_PATH: &str = "/climate/forecast";

/// Query string pairs for a request
pub type Query = Vec<(&'static str, String)>;

/// Source of climate API responses
pub trait ClimateApi: Send + Sync + 'static {
    /// GET `path` with `query` and return the raw JSON body
    fn get(&self, path: &'static str, query: Query) -> impl Future<Output = AppResult<Value>> + Send;
}

/// HTTP implementation backed by reqwest
#[derive(Clone)]
pub struct ClimateClient {
    client: Client,
    base_url: String,
}

impl ClimateClient {
    /// Create a new ClimateClient
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ClimateApi for ClimateClient {
    async fn get(&self, path: &'static str, query: Query) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "Climate API request");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("{} request failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "{} returned {} - {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("{} returned invalid JSON: {}", path, e)))
    }
}

pub fn coordinate_query(point: &GeoPoint) -> Query {
    vec![
        ("lat", point.latitude.to_string()),
        ("lon", point.longitude.to_string()),
    ]
}

/// Current conditions for a named city
pub async fn current_by_city<C: ClimateApi>(api: &C, city: &City) -> AppResult<WeatherSnapshot> {
    let mut query = vec![("city", city.name.trim().to_string())];
    if let Some(country) = city.country.as_deref().filter(|c| !c.trim().is_empty()) {
        query.push(("country", country.trim().to_string()));
    }

    let body = api.get(CURRENT_BY_CITY_PATH, query).await?;
    envelope::parse_typed(body).map_err(AppError::NoWeatherData)
}

/// Current conditions at a coordinate pair
pub async fn current_by_coordinates<C: ClimateApi>(
    api: &C,
    point: &GeoPoint,
) -> AppResult<WeatherSnapshot> {
    let body = api
        .get(CURRENT_BY_COORDINATES_PATH, coordinate_query(point))
        .await?;
    envelope::parse_typed(body).map_err(AppError::NoWeatherData)
}

pub async fn forecast<C: ClimateApi>(api: &C, point: &GeoPoint) -> AppResult<ForecastSeries> {
    let body = api.get(FORECAST_PATH, coordinate_query(point)).await?;
    Ok(envelope::parse_forecast(body)?)
}
