//! Error handling for the Climate Dashboard
//!
//! Provides consistent error responses for the browser front end

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::envelope::EnvelopeError;
use shared::navigator::NavigationError;
use shared::storage::StorageError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid city data: {0}")]
    InvalidCity(String),

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Nothing to retry: no location has been loaded yet")]
    NoRetryTarget,

    // Upstream climate API errors
    #[error("No weather data available")]
    NoWeatherData(#[source] EnvelopeError),

    #[error("Climate API response invalid: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Climate API timed out after {0} seconds")]
    Timeout(u64),

    #[error("Climate API request failed: {0}")]
    ExternalService(String),

    // Local persistence
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for the dashboard's error banner
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCity(_) => shared::validation::INVALID_CITY.to_string(),
            AppError::NoWeatherData(_) => "No weather data available".to_string(),
            AppError::Timeout(_) => {
                "The weather service took too long to respond. Please try again.".to_string()
            }
            AppError::ExternalService(_) | AppError::Envelope(_) => {
                "Unable to reach the weather service. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidCity(_) => (StatusCode::BAD_REQUEST, "INVALID_CITY"),
            AppError::Validation { .. } | AppError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Navigation(_) => (StatusCode::CONFLICT, "INVALID_NAVIGATION"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::NoRetryTarget => (StatusCode::CONFLICT, "NO_RETRY_TARGET"),
            AppError::NoWeatherData(_) => (StatusCode::BAD_GATEWAY, "NO_WEATHER_DATA"),
            AppError::Envelope(_) => (StatusCode::BAD_GATEWAY, "INVALID_UPSTREAM_RESPONSE"),
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            AppError::ExternalService(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };
        let message = match &self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.user_message(),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        match errors.field_errors().into_iter().next() {
            Some((field, errs)) => AppError::Validation {
                field: field.to_string(),
                message: errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_is_500() {
        let response = AppError::Internal("Task join error: cancelled".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::Timeout(10).into_response().status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::ExternalService("connection refused".into()).user_message(),
            "Unable to reach the weather service. Please try again."
        );
    }
}
