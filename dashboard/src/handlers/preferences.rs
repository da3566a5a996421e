//! HTTP handlers for display preferences

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::ThemePreference;

use crate::error::{AppError, AppResult};
use crate::external::ClimateApi;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: ThemePreference,
}

#[derive(Debug, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: String,
}

pub async fn get_theme<C: ClimateApi>(
    State(state): State<AppState<C>>,
) -> AppResult<Json<ThemeResponse>> {
    let theme = state.preferences.theme().await?;
    Ok(Json(ThemeResponse { theme }))
}

pub async fn update_theme<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(input): Json<UpdateThemeRequest>,
) -> AppResult<Json<ThemeResponse>> {
    let theme = input.theme.parse::<ThemePreference>().map_err(|message: &str| {
        AppError::Validation {
            field: "theme".to_string(),
            message: message.to_string(),
        }
    })?;
    let theme = state.preferences.set_theme(theme).await?;
    Ok(Json(ThemeResponse { theme }))
}
