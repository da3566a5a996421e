//! Widget fetchers
//!
//! One table maps each widget to its endpoint. A widget that fails renders
//! its own failure panel and never touches the dashboard's error state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::envelope;
use shared::metrics::{aqi_info, classify_magnitude, uv_info, AqiInfo, MagnitudeBand, UvInfo};
use shared::{AirQualityReading, Earthquake, ForecastSeries, GeoPoint, UvReading, WeatherSnapshot};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::climate_api::{self, ClimateApi, Query};

pub const DEFAULT_EARTHQUAKE_RADIUS_KM: u32 = 500;
pub const DEFAULT_MIN_MAGNITUDE: f64 = 2.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Current,
    Forecast,
    SevenDay,
    Hourly,
    AirQuality,
    UvIndex,
    Earthquakes,
    SmartAlerts,
    AiPredictions,
    IotDashboard,
}

struct WidgetEndpoint {
    kind: WidgetKind,
    slug: &'static str,
    path: &'static str,
}

const WIDGETS: &[WidgetEndpoint] = &[
    WidgetEndpoint { kind: WidgetKind::Current, slug: "current", path: climate_api::CURRENT_BY_COORDINATES_PATH },
    WidgetEndpoint { kind: WidgetKind::Forecast, slug: "forecast", path: climate_api::FORECAST_PATH },
    WidgetEndpoint { kind: WidgetKind::SevenDay, slug: "seven_day", path: "/climate/forecast/7day" },
    WidgetEndpoint { kind: WidgetKind::Hourly, slug: "hourly", path: "/climate/forecast/hourly" },
    WidgetEndpoint { kind: WidgetKind::AirQuality, slug: "air_quality", path: "/air-quality/" },
    WidgetEndpoint { kind: WidgetKind::UvIndex, slug: "uv_index", path: "/climate/uv-index" },
    WidgetEndpoint { kind: WidgetKind::Earthquakes, slug: "earthquakes", path: "/disasters/earthquakes" },
    WidgetEndpoint { kind: WidgetKind::SmartAlerts, slug: "smart_alerts", path: "/alerts/smart" },
    WidgetEndpoint { kind: WidgetKind::AiPredictions, slug: "ai_predictions", path: "/predictions/ai" },
    WidgetEndpoint { kind: WidgetKind::IotDashboard, slug: "iot_dashboard", path: "/iot/dashboard" },
];

impl WidgetKind {
    pub fn all() -> impl Iterator<Item = WidgetKind> {
        WIDGETS.iter().map(|w| w.kind)
    }

    fn endpoint(&self) -> &'static WidgetEndpoint {
        // WIDGETS lists every variant
        WIDGETS
            .iter()
            .find(|w| w.kind == *self)
            .unwrap_or(&WIDGETS[0])
    }

    pub fn slug(&self) -> &'static str {
        self.endpoint().slug
    }

    pub fn path(&self) -> &'static str {
        self.endpoint().path
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for WidgetKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WIDGETS
            .iter()
            .find(|w| w.slug == s)
            .map(|w| w.kind)
            .ok_or_else(|| AppError::NotFound(format!("Widget '{}'", s)))
    }
}

/// Location and filters for a widget request
#[derive(Debug, Clone, Copy)]
pub struct WidgetQuery {
    pub point: GeoPoint,
    pub radius_km: Option<u32>,
    pub min_magnitude: Option<f64>,
}

impl WidgetQuery {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            point,
            radius_km: None,
            min_magnitude: None,
        }
    }

    fn to_query(&self, kind: WidgetKind) -> Query {
        let mut query = climate_api::coordinate_query(&self.point);
        if kind == WidgetKind::Earthquakes {
            query.push((
                "radius",
                self.radius_km.unwrap_or(DEFAULT_EARTHQUAKE_RADIUS_KM).to_string(),
            ));
            query.push((
                "min_magnitude",
                self.min_magnitude.unwrap_or(DEFAULT_MIN_MAGNITUDE).to_string(),
            ));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AirQualityView {
    pub reading: AirQualityReading,
    pub info: AqiInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct UvView {
    pub reading: UvReading,
    pub info: UvInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarthquakeView {
    #[serde(flatten)]
    pub quake: Earthquake,
    pub band: MagnitudeBand,
    pub color: &'static str,
}

impl From<Earthquake> for EarthquakeView {
    fn from(quake: Earthquake) -> Self {
        let band = classify_magnitude(quake.magnitude);
        Self {
            quake,
            band,
            color: band.color(),
        }
    }
}

/// Payload of a loaded widget
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum WidgetData {
    Weather(WeatherSnapshot),
    Forecast(ForecastSeries),
    AirQuality(AirQualityView),
    UvIndex(UvView),
    Earthquakes(Vec<EarthquakeView>),
    /// Passed through untyped
    Raw(Value),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelState {
    Ready { data: WidgetData },
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetPanel {
    pub kind: WidgetKind,
    #[serde(flatten)]
    pub state: PanelState,
}

impl WidgetPanel {
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PanelState::Ready { .. })
    }
}

pub struct WidgetService<C> {
    api: Arc<C>,
}

impl<C> Clone for WidgetService<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<C: ClimateApi> WidgetService<C> {
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    /// Load one widget. Failures come back as a failed panel, never an error.
    pub async fn panel(&self, kind: WidgetKind, query: WidgetQuery) -> WidgetPanel {
        let state = match self.fetch(kind, query).await {
            Ok(data) => PanelState::Ready { data },
            Err(err) => {
                tracing::warn!(widget = %kind, error = %err, "Widget failed to load");
                PanelState::Failed {
                    message: err.user_message(),
                }
            }
        };
        WidgetPanel { kind, state }
    }

    pub async fn fetch(&self, kind: WidgetKind, query: WidgetQuery) -> AppResult<WidgetData> {
        let body = self.api.get(kind.path(), query.to_query(kind)).await?;

        let data = match kind {
            WidgetKind::Current => WidgetData::Weather(envelope::parse_typed(body)?),
            WidgetKind::Forecast | WidgetKind::SevenDay | WidgetKind::Hourly => {
                WidgetData::Forecast(envelope::parse_forecast(body)?)
            }
            WidgetKind::AirQuality => {
                let reading: AirQualityReading = envelope::parse_typed(body)?;
                let info = aqi_info(reading.index());
                WidgetData::AirQuality(AirQualityView { reading, info })
            }
            WidgetKind::UvIndex => {
                let reading: UvReading = envelope::parse_typed(body)?;
                let info = uv_info(reading.uv_index);
                WidgetData::UvIndex(UvView { reading, info })
            }
            WidgetKind::Earthquakes => WidgetData::Earthquakes(
                envelope::parse_earthquakes(body)?
                    .into_iter()
                    .map(EarthquakeView::from)
                    .collect(),
            ),
            WidgetKind::SmartAlerts | WidgetKind::AiPredictions | WidgetKind::IotDashboard => {
                WidgetData::Raw(envelope::parse_data(body)?)
            }
        };
        Ok(data)
    }

    /// AQI at a point, or `None` when unavailable
    pub async fn air_quality_index(&self, point: GeoPoint) -> Option<u32> {
        match self.fetch(WidgetKind::AirQuality, WidgetQuery::at(point)).await {
            Ok(WidgetData::AirQuality(view)) => Some(view.reading.index()),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "Air quality unavailable for advisories");
                None
            }
        }
    }

    /// UV index at a point, or `None` when unavailable
    pub async fn uv_index(&self, point: GeoPoint) -> Option<f64> {
        match self.fetch(WidgetKind::UvIndex, WidgetQuery::at(point)).await {
            Ok(WidgetData::UvIndex(view)) => Some(view.reading.uv_index),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "UV index unavailable for advisories");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_an_endpoint() {
        assert_eq!(WidgetKind::all().count(), 10);
        for kind in WidgetKind::all() {
            assert_eq!(kind.slug().parse::<WidgetKind>().unwrap(), kind);
            assert!(kind.path().starts_with('/'));
        }
    }

    #[test]
    fn test_slug_matches_serde_name() {
        for kind in WidgetKind::all() {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, Value::String(kind.slug().to_string()));
        }
    }

    #[test]
    fn test_unknown_widget() {
        assert!(matches!("radar".parse::<WidgetKind>(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_earthquake_query_defaults() {
        let query = WidgetQuery::at(GeoPoint::from_scaled(356762, 1396503));
        let params = query.to_query(WidgetKind::Earthquakes);
        assert_eq!(params.len(), 4);
        assert_eq!(params[2], ("radius", "500".to_string()));
        assert_eq!(params[3], ("min_magnitude", "2.5".to_string()));

        assert_eq!(query.to_query(WidgetKind::UvIndex).len(), 2);
    }
}
