//! HTTP handlers for the location navigator

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::navigator::{Breadcrumb, GeoSelection, Navigator, Selection, Step, StepOptions};

use crate::error::AppResult;
use crate::external::ClimateApi;
use crate::services::dashboard::DashboardView;
use crate::AppState;

/// Navigator state as rendered by the picker
#[derive(Debug, Serialize)]
pub struct NavigatorView {
    pub step: Step,
    pub selection: GeoSelection,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub options: StepOptions,
}

impl From<&Navigator> for NavigatorView {
    fn from(navigator: &Navigator) -> Self {
        Self {
            step: navigator.step(),
            selection: navigator.selection(),
            breadcrumbs: navigator.breadcrumbs(),
            options: navigator.options(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub navigator: NavigatorView,
    /// Present when the selection completed a city and the dashboard loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardView>,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub step: Step,
}

/// Get the navigator state
pub async fn get_navigator<C: ClimateApi>(State(state): State<AppState<C>>) -> Json<NavigatorView> {
    Json(NavigatorView::from(&*state.lock_navigator()))
}

/// Select a zone, country, state or city.
///
/// Choosing a city moves to the dashboard step, records the city in the
/// search history and loads its weather.
pub async fn select_location<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(selection): Json<Selection>,
) -> AppResult<Json<NavigationResponse>> {
    let (city, navigator) = {
        let mut navigator = state.lock_navigator();
        let selection = match selection {
            // A bare city name is resolved against the offered cities
            Selection::City(city) if city.coordinates.is_none() => {
                Selection::City(navigator.find_city(&city.name).unwrap_or(city))
            }
            other => other,
        };
        navigator.select(selection)?;
        (navigator.city().cloned(), NavigatorView::from(&*navigator))
    };

    let dashboard = match city {
        Some(city) => {
            if city.coordinates.is_some() {
                if let Err(err) = state.history.record(&city).await {
                    tracing::warn!(city = %city.name, error = %err, "Could not record search");
                }
            }
            Some(state.dashboard.load_location(city).await)
        }
        None => None,
    };

    Ok(Json(NavigationResponse {
        navigator,
        dashboard,
    }))
}

/// Go back one step
pub async fn navigate_back<C: ClimateApi>(State(state): State<AppState<C>>) -> Json<NavigatorView> {
    let mut navigator = state.lock_navigator();
    navigator.back();
    Json(NavigatorView::from(&*navigator))
}

/// Breadcrumb jump to a completed step
pub async fn jump_to_step<C: ClimateApi>(
    State(state): State<AppState<C>>,
    Json(request): Json<JumpRequest>,
) -> AppResult<Json<NavigatorView>> {
    let mut navigator = state.lock_navigator();
    navigator.jump_to(request.step)?;
    Ok(Json(NavigatorView::from(&*navigator)))
}
