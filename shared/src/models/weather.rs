//! Weather data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single point-in-time weather reading as returned by the climate API
///
/// Every field is optional: the backend omits whatever its upstream source
/// did not report, and nothing here validates ranges or units.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    #[serde(default, alias = "temp")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default, alias = "weather_condition")]
    pub conditions: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, alias = "timestamp")]
    pub observed_at: Option<String>,
}

impl WeatherSnapshot {
    /// Conditions and description joined, lowercased, for keyword matching
    pub fn condition_text(&self) -> String {
        let mut text = String::new();
        for part in [&self.conditions, &self.description].into_iter().flatten() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&part.to_lowercase());
        }
        text
    }
}

/// One entry of a forecast, daily or hourly
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    #[serde(default, alias = "timestamp", alias = "datetime")]
    pub date: Option<String>,
    #[serde(default, alias = "temp")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default, alias = "weather_condition")]
    pub conditions: Option<String>,
    /// Probability of precipitation (0-1)
    #[serde(default, alias = "pop")]
    pub precipitation_probability: Option<f64>,
}

/// Forecast entries in the order the API returned them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Air quality reading from the air-quality endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirQualityReading {
    /// Some providers report fractional indices
    pub aqi: f64,
    #[serde(default)]
    pub aqi_category: Option<String>,
    #[serde(default)]
    pub aqi_color: Option<String>,
    #[serde(default)]
    pub pollutants: BTreeMap<String, f64>,
    #[serde(default)]
    pub health_recommendations: Vec<String>,
}

impl AirQualityReading {
    /// The reported index rounded to the nearest whole value used by the AQI bands
    pub fn index(&self) -> u32 {
        self.aqi.round().clamp(0.0, u32::MAX as f64) as u32
    }
}

/// UV index reading
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UvReading {
    #[serde(alias = "uv")]
    pub uv_index: f64,
    #[serde(default)]
    pub max_uv: Option<f64>,
    #[serde(default)]
    pub observed_at: Option<String>,
}

/// A reported earthquake
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Earthquake {
    pub magnitude: f64,
    #[serde(default, alias = "location")]
    pub place: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, alias = "depth")]
    pub depth_km: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}
