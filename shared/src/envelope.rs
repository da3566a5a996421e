//! Parsing of the `{success, data}` response envelope used by every climate
//! API endpoint

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Earthquake, ForecastSeries};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Response is not an API envelope: {0}")]
    Malformed(String),

    #[error("API reported failure: {0}")]
    Failed(String),

    #[error("Response carried no data")]
    MissingData,

    #[error("Unexpected data shape: {0}")]
    Shape(String),
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Validate the envelope and return its `data` payload untouched
pub fn parse_data(body: Value) -> Result<Value, EnvelopeError> {
    let envelope: RawEnvelope =
        serde_json::from_value(body).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;

    if !envelope.success {
        let reason = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(EnvelopeError::Failed(reason));
    }

    match envelope.data {
        None | Some(Value::Null) => Err(EnvelopeError::MissingData),
        Some(data) => Ok(data),
    }
}

/// Validate the envelope and decode `data` into `T`
pub fn parse_typed<T: DeserializeOwned>(body: Value) -> Result<T, EnvelopeError> {
    let data = parse_data(body)?;
    serde_json::from_value(data).map_err(|e| EnvelopeError::Shape(e.to_string()))
}

/// Forecast data arrives either as a bare list or wrapped under one of a few keys
pub fn parse_forecast(body: Value) -> Result<ForecastSeries, EnvelopeError> {
    let data = parse_data(body)?;
    let list = unwrap_list(data, &["forecast", "daily", "hourly", "list"])?;
    serde_json::from_value(list).map_err(|e| EnvelopeError::Shape(e.to_string()))
}

pub fn parse_earthquakes(body: Value) -> Result<Vec<Earthquake>, EnvelopeError> {
    let data = parse_data(body)?;
    let list = unwrap_list(data, &["earthquakes", "events"])?;
    serde_json::from_value(list).map_err(|e| EnvelopeError::Shape(e.to_string()))
}

fn unwrap_list(data: Value, keys: &[&str]) -> Result<Value, EnvelopeError> {
    match data {
        Value::Array(_) => Ok(data),
        Value::Object(mut map) => keys
            .iter()
            .find_map(|k| match map.remove(*k) {
                Some(v @ Value::Array(_)) => Some(v),
                _ => None,
            })
            .ok_or_else(|| EnvelopeError::Shape(format!("expected a list under one of {:?}", keys))),
        other => Err(EnvelopeError::Shape(format!("expected a list, got {}", other))),
    }
}
