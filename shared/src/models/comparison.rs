//! Location comparison models

use serde::{Deserialize, Serialize};

use super::weather::WeatherSnapshot;

/// A location held in the comparison set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonEntry {
    /// Creation timestamp in milliseconds, unique within a set
    pub id: i64,
    pub name: String,
    pub data: WeatherSnapshot,
}

/// Metrics shown in the comparison table, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    Temperature,
    FeelsLike,
    Humidity,
    Pressure,
    WindSpeed,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 5] = [
        ComparisonMetric::Temperature,
        ComparisonMetric::FeelsLike,
        ComparisonMetric::Humidity,
        ComparisonMetric::Pressure,
        ComparisonMetric::WindSpeed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonMetric::Temperature => "Temperature",
            ComparisonMetric::FeelsLike => "Feels Like",
            ComparisonMetric::Humidity => "Humidity",
            ComparisonMetric::Pressure => "Pressure",
            ComparisonMetric::WindSpeed => "Wind Speed",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ComparisonMetric::Temperature | ComparisonMetric::FeelsLike => "°C",
            ComparisonMetric::Humidity => "%",
            ComparisonMetric::Pressure => "hPa",
            ComparisonMetric::WindSpeed => "m/s",
        }
    }

    pub fn value_of(&self, snapshot: &WeatherSnapshot) -> Option<f64> {
        match self {
            ComparisonMetric::Temperature => snapshot.temperature,
            ComparisonMetric::FeelsLike => snapshot.feels_like,
            ComparisonMetric::Humidity => snapshot.humidity,
            ComparisonMetric::Pressure => snapshot.pressure,
            ComparisonMetric::WindSpeed => snapshot.wind_speed,
        }
    }
}

/// Highlight class for a comparison cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Highest,
    Lowest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonCell {
    pub entry_id: i64,
    pub value: Option<f64>,
    pub display: String,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    pub label: String,
    pub cells: Vec<ComparisonCell>,
}

/// Derived comparison table, one row per metric
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComparisonTable {
    pub locations: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}
