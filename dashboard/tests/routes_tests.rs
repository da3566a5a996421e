//! HTTP surface tests
//!
//! Drives the router with `oneshot` requests against a scripted climate API
//! and an in-memory store.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use climate_dashboard::external::climate_api::{CURRENT_BY_CITY_PATH, FORECAST_PATH};
use climate_dashboard::{create_app, AppState, Config};
use common::{forecast, ok, weather, FakeClimateApi, Reply};
use serde_json::{json, Value};
use shared::storage::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

fn app(api: FakeClimateApi) -> Router {
    create_app(AppState::new(
        Config::default(),
        api,
        Arc::new(MemoryStore::new()),
    ))
}

fn default_api() -> FakeClimateApi {
    FakeClimateApi::new()
        .with(CURRENT_BY_CITY_PATH, Reply::Json(weather(12.0, 65.0)))
        .with(FORECAST_PATH, Reply::Json(forecast()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ============================================================================
// Health and navigation
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = app(default_api());
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_navigation_to_dashboard_loads_and_records_history() {
    let app = app(default_api());

    let (status, body) = send(&app, "GET", "/api/v1/navigator", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "zone");
    assert_eq!(body["options"]["kind"], "places");

    for (level, value) in [("zone", "europe"), ("country", "gb"), ("state", "gb-eng")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/navigator/select",
            Some(json!({ "level": level, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/navigator/select",
        Some(json!({ "level": "city", "value": { "name": "London" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigator"]["step"], "dashboard");
    assert_eq!(body["dashboard"]["climate_data"]["temperature"], 12.0);
    assert_eq!(body["dashboard"]["loading"], false);
    assert_eq!(body["dashboard"]["forecast_data"].as_array().unwrap().len(), 2);

    let (_, history) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(history[0]["name"], "London");

    let (_, dashboard) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(dashboard["city"]["name"], "London");
}

#[tokio::test]
async fn test_back_and_forward_jump() {
    let app = app(default_api());
    send(
        &app,
        "POST",
        "/api/v1/navigator/select",
        Some(json!({ "level": "zone", "value": "asia" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/navigator/jump",
        Some(json!({ "step": "city" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_NAVIGATION");

    let (status, body) = send(&app, "POST", "/api/v1/navigator/back", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "zone");
    assert!(body["selection"]["zone"].is_null());
}

#[tokio::test]
async fn test_selecting_ahead_is_rejected() {
    let app = app(default_api());
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/navigator/select",
        Some(json!({ "level": "state", "value": "us-ny" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_NAVIGATION");
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_direct_load_with_blank_name_reports_invalid_city() {
    let app = app(default_api());
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/dashboard/load",
        Some(json!({ "name": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["message"], "Invalid city data");
}

#[tokio::test]
async fn test_retry_without_load_conflicts() {
    let app = app(default_api());
    let (status, body) = send(&app, "POST", "/api/v1/dashboard/retry", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "NO_RETRY_TARGET");
}

#[tokio::test]
async fn test_advisories_use_air_quality_when_available() {
    let api = FakeClimateApi::new()
        .with(CURRENT_BY_CITY_PATH, Reply::Json(weather(22.0, 50.0)))
        .with(FORECAST_PATH, Reply::Json(forecast()))
        .with("/air-quality/", Reply::Json(ok(json!({ "aqi": 180 }))))
        .with("/climate/uv-index", Reply::Fail("uv offline".into()));
    let app = app(api);

    send(
        &app,
        "POST",
        "/api/v1/dashboard/load",
        Some(json!({ "name": "Madrid", "latitude": "40.4168", "longitude": "-3.7038" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/v1/dashboard/advisories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aqi"], 180);
    assert!(body["uv_index"].is_null());
    let titles: Vec<_> = body["advisories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect();
    assert!(titles.contains(&"Poor Air Quality".to_string()));
    assert!(!titles.contains(&"Great Day Outside".to_string()));
}

// ============================================================================
// Comparison
// ============================================================================

#[tokio::test]
async fn test_comparison_add_list_clear() {
    let app = app(default_api());

    let (status, body) = send(&app, "POST", "/api/v1/comparison", Some(json!({ "name": "Oslo" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "added");
    let id = body["entry"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, "POST", "/api/v1/comparison", Some(json!({ "name": " " }))).await;
    assert_eq!(body["outcome"], "ignored");
    assert_eq!(body["reason"], "blank_name");

    let (_, body) = send(&app, "GET", "/api/v1/comparison", None).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["table"]["locations"][0], "Oslo");

    let (_, body) = send(&app, "DELETE", &format!("/api/v1/comparison/{}", id), None).await;
    assert_eq!(body["removed"], true);

    let (status, _) = send(&app, "DELETE", "/api/v1/comparison", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ============================================================================
// Widgets
// ============================================================================

#[tokio::test]
async fn test_air_quality_widget_is_enriched() {
    let app = app(default_api().with("/air-quality/", Reply::Json(ok(json!({ "aqi": 120 })))));
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/widgets/air_quality?lat=51.5074&lon=-0.1278",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "air_quality");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["data"]["payload"]["info"]["category"], "unhealthy_for_sensitive_groups");
}

#[tokio::test]
async fn test_fractional_aqi_is_rounded() {
    let app = app(default_api().with("/air-quality/", Reply::Json(ok(json!({ "aqi": 50.6 })))));
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/widgets/air_quality?lat=51.5074&lon=-0.1278",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["data"]["payload"]["info"]["aqi"], 51);
    assert_eq!(body["data"]["payload"]["info"]["category"], "moderate");
}

#[tokio::test]
async fn test_earthquake_widget_bands() {
    let app = app(default_api().with(
        "/disasters/earthquakes",
        Reply::Json(ok(json!({ "earthquakes": [{ "magnitude": 6.3, "place": "Offshore" }] }))),
    ));
    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/widgets/earthquakes?lat=35.6762&lon=139.6503&radius=100&min_magnitude=4",
        None,
    )
    .await;

    let quake = &body["data"]["payload"][0];
    assert_eq!(quake["band"], "strong");
    assert_eq!(quake["place"], "Offshore");
}

#[tokio::test]
async fn test_failing_widget_renders_its_own_error() {
    let app = app(default_api());
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/widgets/smart_alerts?lat=51.5074&lon=-0.1278",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert!(body["message"].as_str().unwrap().len() > 0);

    let (_, dashboard) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert!(dashboard["error"].is_null());
}

#[tokio::test]
async fn test_widget_rejects_unknown_kind_and_bad_coordinates() {
    let app = app(default_api());

    let (status, _) = send(&app, "GET", "/api/v1/widgets/radar?lat=0&lon=0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/v1/widgets/uv_index?lat=91&lon=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "coordinates");
}

// ============================================================================
// Preferences, features and metrics
// ============================================================================

#[tokio::test]
async fn test_theme_round_trip() {
    let app = app(default_api());

    let (_, body) = send(&app, "GET", "/api/v1/preferences/theme", None).await;
    assert_eq!(body["theme"], "auto");

    let (status, _) = send(&app, "PUT", "/api/v1/preferences/theme", Some(json!({ "theme": "Dark" }))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/api/v1/preferences/theme", None).await;
    assert_eq!(body["theme"], "dark");

    let (status, body) = send(&app, "PUT", "/api/v1/preferences/theme", Some(json!({ "theme": "neon" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_feature_cards() {
    let app = app(default_api());

    let (status, first) = send(&app, "GET", "/api/v1/features/flood_risk?location=Oslo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["location"], "Oslo");
    let (_, second) = send(&app, "GET", "/api/v1/features/flood_risk?location=Oslo", None).await;
    assert_eq!(first, second);

    let (status, _) = send(&app, "GET", "/api/v1/features/volcano", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metric_lookups() {
    let app = app(default_api());

    let (_, body) = send(&app, "GET", "/api/v1/metrics/aqi/151", None).await;
    assert_eq!(body["category"], "unhealthy");

    let (_, body) = send(&app, "GET", "/api/v1/metrics/uv/7.6", None).await;
    assert_eq!(body["category"], "very_high");

    let (_, body) = send(&app, "GET", "/api/v1/metrics/magnitude/5.2", None).await;
    assert_eq!(body["band"], "moderate");
    assert_eq!(body["label"], "Moderate");
}
