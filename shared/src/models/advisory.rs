//! Advisory card models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory priority, used for styling only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

/// Category an advisory belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCategory {
    Temperature,
    Precipitation,
    Humidity,
    Wind,
    AirQuality,
    UvExposure,
    Activity,
}

/// A recommendation surfaced to the user for the current conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryCard {
    pub icon: String,
    pub category: AdvisoryCategory,
    pub title: String,
    pub advice: String,
    pub priority: Priority,
}
