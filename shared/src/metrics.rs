//! Derived display metrics: AQI, UV index and earthquake magnitude bands
//!
//! Each classifier is a fixed threshold table. Identical input always
//! yields identical output.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Air Quality Index
// ============================================================================

/// US EPA AQI category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitiveGroups,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301+
    Hazardous,
}

impl AqiCategory {
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00e400",
            AqiCategory::Moderate => "#ffff00",
            AqiCategory::UnhealthyForSensitiveGroups => "#ff7e00",
            AqiCategory::Unhealthy => "#ff0000",
            AqiCategory::VeryUnhealthy => "#8f3f97",
            AqiCategory::Hazardous => "#7e0023",
        }
    }

    pub fn health_advice(&self) -> &'static str {
        match self {
            AqiCategory::Good => {
                "Air quality is satisfactory and poses little or no risk."
            }
            AqiCategory::Moderate => {
                "Air quality is acceptable. Unusually sensitive people should consider limiting prolonged outdoor exertion."
            }
            AqiCategory::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects. Children, older adults and people with lung disease should reduce prolonged outdoor exertion."
            }
            AqiCategory::Unhealthy => {
                "Everyone may begin to experience health effects. Sensitive groups should avoid prolonged outdoor exertion."
            }
            AqiCategory::VeryUnhealthy => {
                "Health alert: everyone may experience more serious health effects. Avoid outdoor activities."
            }
            AqiCategory::Hazardous => {
                "Health warning of emergency conditions. Everyone should stay indoors and keep activity levels low."
            }
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AqiCategory::Good => write!(f, "Good"),
            AqiCategory::Moderate => write!(f, "Moderate"),
            AqiCategory::UnhealthyForSensitiveGroups => {
                write!(f, "Unhealthy for Sensitive Groups")
            }
            AqiCategory::Unhealthy => write!(f, "Unhealthy"),
            AqiCategory::VeryUnhealthy => write!(f, "Very Unhealthy"),
            AqiCategory::Hazardous => write!(f, "Hazardous"),
        }
    }
}

/// Classify an AQI reading
pub fn classify_aqi(aqi: u32) -> AqiCategory {
    match aqi {
        0..=50 => AqiCategory::Good,
        51..=100 => AqiCategory::Moderate,
        101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
        151..=200 => AqiCategory::Unhealthy,
        201..=300 => AqiCategory::VeryUnhealthy,
        _ => AqiCategory::Hazardous,
    }
}

/// Label, color and advice for an AQI reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AqiInfo {
    pub aqi: u32,
    pub category: AqiCategory,
    pub label: String,
    pub color: String,
    pub advice: String,
}

pub fn aqi_info(aqi: u32) -> AqiInfo {
    let category = classify_aqi(aqi);
    AqiInfo {
        aqi,
        category,
        label: category.to_string(),
        color: category.color().to_string(),
        advice: category.health_advice().to_string(),
    }
}

// ============================================================================
// UV Index
// ============================================================================

/// WHO UV index category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UvCategory {
    /// 0-2
    Low,
    /// 3-5
    Moderate,
    /// 6-7
    High,
    /// 8-10
    VeryHigh,
    /// 11+
    Extreme,
}

impl UvCategory {
    pub fn color(&self) -> &'static str {
        match self {
            UvCategory::Low => "#289500",
            UvCategory::Moderate => "#f7e400",
            UvCategory::High => "#f85900",
            UvCategory::VeryHigh => "#d8001d",
            UvCategory::Extreme => "#6b49c8",
        }
    }

    pub fn protection_advice(&self) -> &'static str {
        match self {
            UvCategory::Low => "No protection needed.",
            UvCategory::Moderate => "Wear sunglasses and use SPF 30+ sunscreen.",
            UvCategory::High => "Reduce time in the sun between 10am and 4pm. Wear a hat.",
            UvCategory::VeryHigh => "Minimize sun exposure during midday hours. Seek shade.",
            UvCategory::Extreme => "Avoid sun exposure. Unprotected skin can burn in minutes.",
        }
    }
}

impl fmt::Display for UvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvCategory::Low => write!(f, "Low"),
            UvCategory::Moderate => write!(f, "Moderate"),
            UvCategory::High => write!(f, "High"),
            UvCategory::VeryHigh => write!(f, "Very High"),
            UvCategory::Extreme => write!(f, "Extreme"),
        }
    }
}

/// Classify a UV reading. Fractional readings round to the nearest integer.
pub fn classify_uv(uv_index: f64) -> UvCategory {
    let rounded = uv_index.round();
    if rounded <= 2.0 {
        UvCategory::Low
    } else if rounded <= 5.0 {
        UvCategory::Moderate
    } else if rounded <= 7.0 {
        UvCategory::High
    } else if rounded <= 10.0 {
        UvCategory::VeryHigh
    } else {
        UvCategory::Extreme
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UvInfo {
    pub uv_index: f64,
    pub category: UvCategory,
    pub label: String,
    pub color: String,
    pub advice: String,
}

pub fn uv_info(uv_index: f64) -> UvInfo {
    let category = classify_uv(uv_index);
    UvInfo {
        uv_index,
        category,
        label: category.to_string(),
        color: category.color().to_string(),
        advice: category.protection_advice().to_string(),
    }
}

// ============================================================================
// Earthquake magnitude
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeBand {
    /// 7.0+
    Major,
    /// 6.0-6.9
    Strong,
    /// 5.0-5.9
    Moderate,
    /// 4.0-4.9
    Light,
    /// below 4.0
    Minor,
}

impl MagnitudeBand {
    pub fn color(&self) -> &'static str {
        match self {
            MagnitudeBand::Major => "#7f1d1d",
            MagnitudeBand::Strong => "#dc2626",
            MagnitudeBand::Moderate => "#f97316",
            MagnitudeBand::Light => "#facc15",
            MagnitudeBand::Minor => "#22c55e",
        }
    }
}

impl fmt::Display for MagnitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagnitudeBand::Major => write!(f, "Major"),
            MagnitudeBand::Strong => write!(f, "Strong"),
            MagnitudeBand::Moderate => write!(f, "Moderate"),
            MagnitudeBand::Light => write!(f, "Light"),
            MagnitudeBand::Minor => write!(f, "Minor"),
        }
    }
}

pub fn classify_magnitude(magnitude: f64) -> MagnitudeBand {
    if magnitude >= 7.0 {
        MagnitudeBand::Major
    } else if magnitude >= 6.0 {
        MagnitudeBand::Strong
    } else if magnitude >= 5.0 {
        MagnitudeBand::Moderate
    } else if magnitude >= 4.0 {
        MagnitudeBand::Light
    } else {
        MagnitudeBand::Minor
    }
}

pub fn magnitude_color(magnitude: f64) -> &'static str {
    classify_magnitude(magnitude).color()
}
