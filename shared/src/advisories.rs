//! Weather recommendation rules
//!
//! Rules are independent and evaluated in a fixed order. Each rule adds at
//! most one card; no rule suppresses another, so a single snapshot usually
//! yields several cards. Output order is rule order, not severity.

use crate::metrics::{classify_uv, UvCategory};
use crate::models::{AdvisoryCard, AdvisoryCategory, Priority, WeatherSnapshot};

pub const FREEZING_BELOW: f64 = 0.0;
pub const COLD_BELOW: f64 = 10.0;
pub const HOT_ABOVE: f64 = 30.0;
pub const HUMID_ABOVE: f64 = 80.0;
pub const DRY_BELOW: f64 = 30.0;
pub const STRONG_WIND_ABOVE: f64 = 15.0;
pub const POOR_AQI_ABOVE: u32 = 100;

const THUNDER_KEYWORDS: &[&str] = &["thunder", "storm"];
const SNOW_KEYWORDS: &[&str] = &["snow", "sleet", "blizzard"];
const RAIN_KEYWORDS: &[&str] = &["rain", "drizzle", "shower"];

type Rule = fn(&Conditions<'_>) -> Option<AdvisoryCard>;

const RULES: &[Rule] = &[
    temperature_rule,
    precipitation_rule,
    humidity_rule,
    wind_rule,
    air_quality_rule,
    uv_rule,
    activity_window_rule,
];

struct Conditions<'a> {
    weather: &'a WeatherSnapshot,
    condition_text: String,
    aqi: Option<u32>,
    uv_index: Option<f64>,
}

impl Conditions<'_> {
    fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.condition_text.contains(k))
    }

    fn is_precipitating(&self) -> bool {
        self.mentions(THUNDER_KEYWORDS) || self.mentions(SNOW_KEYWORDS) || self.mentions(RAIN_KEYWORDS)
    }
}

/// Compute the advisory cards for the current conditions
pub fn compute_advisories(
    weather: &WeatherSnapshot,
    aqi: Option<u32>,
    uv_index: Option<f64>,
) -> Vec<AdvisoryCard> {
    let conditions = Conditions {
        weather,
        condition_text: weather.condition_text(),
        aqi,
        uv_index,
    };

    RULES.iter().filter_map(|rule| rule(&conditions)).collect()
}

fn card(
    icon: &str,
    category: AdvisoryCategory,
    title: &str,
    advice: String,
    priority: Priority,
) -> AdvisoryCard {
    AdvisoryCard {
        icon: icon.to_string(),
        category,
        title: title.to_string(),
        advice,
        priority,
    }
}

fn temperature_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let temp = c.weather.temperature?;
    if temp < FREEZING_BELOW {
        Some(card(
            "🥶",
            AdvisoryCategory::Temperature,
            "Freezing Conditions",
            format!(
                "It is {:.1}°C. Wear insulated layers, cover exposed skin and watch for ice on roads and walkways.",
                temp
            ),
            Priority::Critical,
        ))
    } else if temp < COLD_BELOW {
        Some(card(
            "🧥",
            AdvisoryCategory::Temperature,
            "Cold Weather",
            format!("It is {:.1}°C. A warm jacket is recommended.", temp),
            Priority::Medium,
        ))
    } else if temp > HOT_ABOVE {
        Some(card(
            "🌡️",
            AdvisoryCategory::Temperature,
            "High Temperature",
            format!(
                "It is {:.1}°C. Stay hydrated, wear light clothing and avoid strenuous activity at midday.",
                temp
            ),
            Priority::High,
        ))
    } else {
        None
    }
}

fn precipitation_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    if c.mentions(THUNDER_KEYWORDS) {
        Some(card(
            "⛈️",
            AdvisoryCategory::Precipitation,
            "Thunderstorm Warning",
            "Thunderstorms reported. Stay indoors and away from open ground and tall objects.".to_string(),
            Priority::Critical,
        ))
    } else if c.mentions(SNOW_KEYWORDS) {
        Some(card(
            "❄️",
            AdvisoryCategory::Precipitation,
            "Snowfall",
            "Snow is falling. Allow extra travel time and wear footwear with good grip.".to_string(),
            Priority::High,
        ))
    } else if c.mentions(RAIN_KEYWORDS) {
        Some(card(
            "☔",
            AdvisoryCategory::Precipitation,
            "Rain Expected",
            "Carry an umbrella or a waterproof jacket.".to_string(),
            Priority::Medium,
        ))
    } else {
        None
    }
}

fn humidity_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let humidity = c.weather.humidity?;
    if humidity > HUMID_ABOVE {
        Some(card(
            "💧",
            AdvisoryCategory::Humidity,
            "High Humidity",
            format!("Humidity is {:.0}%. It will feel warmer than it is; take breaks in shade.", humidity),
            Priority::Low,
        ))
    } else if humidity < DRY_BELOW {
        Some(card(
            "🏜️",
            AdvisoryCategory::Humidity,
            "Low Humidity",
            format!("Humidity is {:.0}%. Drink water regularly and moisturize skin.", humidity),
            Priority::Low,
        ))
    } else {
        None
    }
}

fn wind_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let wind = c.weather.wind_speed?;
    (wind > STRONG_WIND_ABOVE).then(|| {
        card(
            "💨",
            AdvisoryCategory::Wind,
            "Strong Winds",
            format!("Wind speed is {:.1} m/s. Secure loose objects and take care when cycling or driving.", wind),
            Priority::High,
        )
    })
}

fn air_quality_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let aqi = c.aqi?;
    if aqi <= POOR_AQI_ABOVE {
        return None;
    }
    let priority = match aqi {
        0..=150 => Priority::Medium,
        151..=200 => Priority::High,
        _ => Priority::Critical,
    };
    let category = crate::metrics::classify_aqi(aqi);
    Some(card(
        "😷",
        AdvisoryCategory::AirQuality,
        "Poor Air Quality",
        format!("AQI is {} ({}). {}", aqi, category, category.health_advice()),
        priority,
    ))
}

fn uv_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let uv = c.uv_index?;
    let category = classify_uv(uv);
    let priority = match category {
        UvCategory::Low | UvCategory::Moderate => return None,
        UvCategory::High => Priority::Medium,
        UvCategory::VeryHigh => Priority::High,
        UvCategory::Extreme => Priority::Critical,
    };
    Some(card(
        "🕶️",
        AdvisoryCategory::UvExposure,
        "High UV Exposure",
        format!("UV index is {:.1} ({}). {}", uv, category, category.protection_advice()),
        priority,
    ))
}

fn activity_window_rule(c: &Conditions<'_>) -> Option<AdvisoryCard> {
    let temp = c.weather.temperature?;
    let humidity = c.weather.humidity?;
    let wind = c.weather.wind_speed?;

    let comfortable = (18.0..=26.0).contains(&temp)
        && (30.0..=70.0).contains(&humidity)
        && wind < 10.0
        && !c.is_precipitating();
    let clean_air = c.aqi.map_or(true, |aqi| aqi <= POOR_AQI_ABOVE);
    let mild_sun = c
        .uv_index
        .map_or(true, |uv| matches!(classify_uv(uv), UvCategory::Low | UvCategory::Moderate));

    (comfortable && clean_air && mild_sun).then(|| {
        card(
            "🚴",
            AdvisoryCategory::Activity,
            "Great Day Outside",
            "Conditions are ideal for walking, running or cycling.".to_string(),
            Priority::Low,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temp: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: Some(temp),
            ..Default::default()
        }
    }

    fn titles(cards: &[AdvisoryCard]) -> Vec<&str> {
        cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_freezing_conditions() {
        let cards = compute_advisories(&weather(-5.0), None, None);
        assert!(titles(&cards).contains(&"Freezing Conditions"));
        assert_eq!(cards[0].priority, Priority::Critical);
    }

    #[test]
    fn test_high_temperature() {
        let cards = compute_advisories(&weather(35.0), None, None);
        assert!(titles(&cards).contains(&"High Temperature"));
    }

    #[test]
    fn test_wind_and_rain_both_reported() {
        let snapshot = WeatherSnapshot {
            temperature: Some(12.0),
            wind_speed: Some(18.0),
            conditions: Some("Heavy Rain".to_string()),
            ..Default::default()
        };
        let cards = compute_advisories(&snapshot, None, None);
        let titles = titles(&cards);
        assert!(titles.contains(&"Strong Winds"));
        assert!(titles.contains(&"Rain Expected"));
    }

    #[test]
    fn test_output_follows_rule_order() {
        let snapshot = WeatherSnapshot {
            temperature: Some(33.0),
            humidity: Some(85.0),
            wind_speed: Some(20.0),
            conditions: Some("Thunderstorm".to_string()),
            ..Default::default()
        };
        let cards = compute_advisories(&snapshot, Some(180), Some(9.0));
        let categories: Vec<_> = cards.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                AdvisoryCategory::Temperature,
                AdvisoryCategory::Precipitation,
                AdvisoryCategory::Humidity,
                AdvisoryCategory::Wind,
                AdvisoryCategory::AirQuality,
                AdvisoryCategory::UvExposure,
            ]
        );
    }

    #[test]
    fn test_air_quality_priority_scales() {
        let w = weather(20.0);
        assert!(compute_advisories(&w, Some(100), None)
            .iter()
            .all(|c| c.category != AdvisoryCategory::AirQuality));
        let find = |aqi| {
            compute_advisories(&w, Some(aqi), None)
                .into_iter()
                .find(|c| c.category == AdvisoryCategory::AirQuality)
                .map(|c| c.priority)
        };
        assert_eq!(find(120), Some(Priority::Medium));
        assert_eq!(find(190), Some(Priority::High));
        assert_eq!(find(250), Some(Priority::Critical));
    }

    #[test]
    fn test_uv_card_follows_rounded_category() {
        let w = weather(20.0);
        let find = |uv| {
            compute_advisories(&w, None, Some(uv))
                .into_iter()
                .find(|c| c.category == AdvisoryCategory::UvExposure)
                .map(|c| c.priority)
        };
        assert_eq!(find(5.4), None);
        assert_eq!(find(5.6), Some(Priority::Medium));
        assert_eq!(find(7.4), Some(Priority::Medium));
        assert_eq!(find(7.6), Some(Priority::High));
        assert_eq!(find(10.4), Some(Priority::High));
        assert_eq!(find(10.6), Some(Priority::Critical));
    }

    #[test]
    fn test_ideal_activity_window() {
        let snapshot = WeatherSnapshot {
            temperature: Some(22.0),
            humidity: Some(50.0),
            wind_speed: Some(3.0),
            conditions: Some("Clear".to_string()),
            ..Default::default()
        };
        let cards = compute_advisories(&snapshot, Some(30), Some(3.0));
        assert_eq!(titles(&cards), vec!["Great Day Outside"]);

        let cards = compute_advisories(&snapshot, Some(30), Some(7.0));
        assert!(!titles(&cards).contains(&"Great Day Outside"));
    }

    #[test]
    fn test_empty_snapshot_yields_nothing() {
        assert!(compute_advisories(&WeatherSnapshot::default(), None, None).is_empty());
    }
}
