//! WebAssembly module for the Climate Dashboard
//!
//! Provides client-side computation for:
//! - AQI, UV and earthquake magnitude classification
//! - Advisory cards and the comparison table
//! - Feature cards and value formatting
//! - The location navigator, search history and theme in `localStorage`
//!
//! Structured values cross the boundary as JSON strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::advisories;
use shared::comparison;
use shared::features::{self, FeatureKind};
use shared::format;
use shared::history::{self, HistoryEntry, SearchHistory};
use shared::metrics;
use shared::navigator::{Navigator, Selection, Step};
use shared::storage::{self, KeyValueStore};
use shared::{City, ComparisonEntry, ThemePreference, WeatherSnapshot};
use wasm_bindgen::prelude::*;

mod local_storage;

pub use local_storage::LocalStorage;

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    log("climate dashboard wasm loaded");
}

// ============================================================================
// Derived metrics
// ============================================================================

/// AQI label, color and advice as JSON
#[wasm_bindgen]
pub fn aqi_info(aqi: u32) -> Result<String, JsValue> {
    to_json(&metrics::aqi_info(aqi)).map_err(to_js)
}

#[wasm_bindgen]
pub fn aqi_color(aqi: u32) -> String {
    metrics::classify_aqi(aqi).color().to_string()
}

/// UV label, color and protection advice as JSON
#[wasm_bindgen]
pub fn uv_info(uv_index: f64) -> Result<String, JsValue> {
    to_json(&metrics::uv_info(uv_index)).map_err(to_js)
}

#[wasm_bindgen]
pub fn magnitude_color(magnitude: f64) -> String {
    metrics::magnitude_color(magnitude).to_string()
}

#[wasm_bindgen]
pub fn magnitude_label(magnitude: f64) -> String {
    metrics::classify_magnitude(magnitude).to_string()
}

// ============================================================================
// Advisories, comparison and feature cards
// ============================================================================

fn advisories_json(weather_json: &str, aqi: Option<u32>, uv_index: Option<f64>) -> Result<String, String> {
    let weather: WeatherSnapshot = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;
    to_json(&advisories::compute_advisories(&weather, aqi, uv_index))
}

/// Advisory cards for a weather snapshot
#[wasm_bindgen]
pub fn compute_advisories(
    weather_json: &str,
    aqi: Option<u32>,
    uv_index: Option<f64>,
) -> Result<String, JsValue> {
    advisories_json(weather_json, aqi, uv_index).map_err(to_js)
}

fn comparison_table_json(entries_json: &str) -> Result<String, String> {
    let entries: Vec<ComparisonEntry> = serde_json::from_str(entries_json)
        .map_err(|e| format!("Invalid comparison JSON: {}", e))?;
    to_json(&comparison::build_table(&entries))
}

/// Comparison table with highest/lowest tags
#[wasm_bindgen]
pub fn comparison_table(entries_json: &str) -> Result<String, JsValue> {
    comparison_table_json(entries_json).map_err(to_js)
}

fn feature_card_json(kind: &str, location: &str) -> Result<String, String> {
    let kind: FeatureKind = kind.parse()?;
    to_json(&features::generate(kind, location))
}

#[wasm_bindgen]
pub fn feature_card(kind: &str, location: &str) -> Result<String, JsValue> {
    feature_card_json(kind, location).map_err(to_js)
}

#[wasm_bindgen]
pub fn format_temperature(value: Option<f64>) -> String {
    format::temperature(value)
}

#[wasm_bindgen]
pub fn format_humidity(value: Option<f64>) -> String {
    format::humidity(value)
}

#[wasm_bindgen]
pub fn format_pressure(value: Option<f64>) -> String {
    format::pressure(value)
}

#[wasm_bindgen]
pub fn format_wind_speed(value: Option<f64>) -> String {
    format::wind_speed(value)
}

// ============================================================================
// Navigator
// ============================================================================

/// Location picker state machine
#[wasm_bindgen]
#[derive(Default)]
pub struct LocationNavigator {
    inner: Navigator,
}

#[derive(Serialize)]
struct NavigatorState<'a> {
    step: Step,
    selection: shared::navigator::GeoSelection,
    breadcrumbs: Vec<shared::navigator::Breadcrumb>,
    options: shared::navigator::StepOptions,
    city: Option<&'a City>,
}

impl LocationNavigator {
    fn state(&self) -> Result<String, String> {
        to_json(&NavigatorState {
            step: self.inner.step(),
            selection: self.inner.selection(),
            breadcrumbs: self.inner.breadcrumbs(),
            options: self.inner.options(),
            city: self.inner.city(),
        })
    }

    fn apply(&mut self, selection_json: &str) -> Result<String, String> {
        let selection: Selection = serde_json::from_str(selection_json)
            .map_err(|e| format!("Invalid selection JSON: {}", e))?;
        let selection = match selection {
            Selection::City(city) if city.coordinates.is_none() => {
                Selection::City(self.inner.find_city(&city.name).unwrap_or(city))
            }
            other => other,
        };
        self.inner.select(selection).map_err(|e| e.to_string())?;
        self.state()
    }

    fn jump(&mut self, step: &str) -> Result<String, String> {
        let step: Step = serde_json::from_value(serde_json::Value::String(step.to_string()))
            .map_err(|_| format!("Unknown step: {}", step))?;
        self.inner.jump_to(step).map_err(|e| e.to_string())?;
        self.state()
    }
}

#[wasm_bindgen]
impl LocationNavigator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step, selections, breadcrumbs and options as JSON
    #[wasm_bindgen(js_name = state)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.state().map_err(to_js)
    }

    /// Apply a `{level, value}` selection
    pub fn select(&mut self, selection_json: &str) -> Result<String, JsValue> {
        self.apply(selection_json).map_err(to_js)
    }

    /// Go back one step. Returns false at the first step.
    pub fn back(&mut self) -> bool {
        self.inner.back()
    }

    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, step: &str) -> Result<String, JsValue> {
        self.jump(step).map_err(to_js)
    }
}

// ============================================================================
// Persisted history and theme
// ============================================================================

fn open_storage() -> Result<LocalStorage, JsValue> {
    LocalStorage::open().map_err(|e| to_js(e.to_string()))
}

/// Recent searches as a JSON array, newest first
#[wasm_bindgen]
pub fn load_search_history() -> Result<String, JsValue> {
    let store = open_storage()?;
    let history = SearchHistory::load(&store).map_err(|e| to_js(e.to_string()))?;
    to_json(&history).map_err(to_js)
}

/// Record a located city; cities without coordinates are ignored
#[wasm_bindgen]
pub fn record_search(city_json: &str) -> Result<String, JsValue> {
    let city: City = serde_json::from_str(city_json)
        .map_err(|e| to_js(format!("Invalid city JSON: {}", e)))?;
    let store = open_storage()?;
    let history = match HistoryEntry::from_city(&city, now()) {
        Some(entry) => history::record_search(&store, entry),
        None => SearchHistory::load(&store),
    }
    .map_err(|e| to_js(e.to_string()))?;
    to_json(&history).map_err(to_js)
}

#[wasm_bindgen]
pub fn clear_search_history() -> Result<(), JsValue> {
    let store = open_storage()?;
    store
        .remove(history::HISTORY_KEY)
        .map_err(|e| to_js(e.to_string()))
}

/// Stored theme, `auto` when unset or unreadable
#[wasm_bindgen]
pub fn load_theme() -> String {
    LocalStorage::open()
        .and_then(|store| storage::load_theme(&store))
        .unwrap_or_default()
        .to_string()
}

#[wasm_bindgen]
pub fn save_theme(theme: &str) -> Result<(), JsValue> {
    let theme = theme.parse::<ThemePreference>().map_err(|e: &str| to_js(e.to_string()))?;
    let store = open_storage()?;
    storage::save_theme(&store, theme).map_err(|e| to_js(e.to_string()))
}
