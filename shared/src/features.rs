//! Mock climate feature cards
//!
//! Every feature kind is one row in [`FEATURES`]: a title plus metric
//! templates. Values are derived from the location name so the same
//! location always gets the same card.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    HeatIndex,
    DroughtRisk,
    FloodRisk,
    EnergyDemand,
    CropStress,
    WildfireRisk,
    SolarPotential,
    Pollen,
}

/// `(label, unit, base, spread)`: values fall in `base..base + spread`
type MetricTemplate = (&'static str, &'static str, f64, f64);

struct FeatureTemplate {
    kind: FeatureKind,
    slug: &'static str,
    title: &'static str,
    icon: &'static str,
    metrics: &'static [MetricTemplate],
}

const FEATURES: &[FeatureTemplate] = &[
    FeatureTemplate {
        kind: FeatureKind::HeatIndex,
        slug: "heat_index",
        title: "Heat Index",
        icon: "🔥",
        metrics: &[("Apparent temperature", "°C", 24.0, 16.0), ("Heat stress hours", "h", 0.0, 10.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::DroughtRisk,
        slug: "drought_risk",
        title: "Drought Risk",
        icon: "🌵",
        metrics: &[("Soil moisture", "%", 10.0, 40.0), ("Days since rain", "d", 0.0, 30.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::FloodRisk,
        slug: "flood_risk",
        title: "Flood Risk",
        icon: "🌊",
        metrics: &[("River level", "m", 0.5, 4.0), ("72h rainfall", "mm", 0.0, 120.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::EnergyDemand,
        slug: "energy_demand",
        title: "Building Energy Demand",
        icon: "⚡",
        metrics: &[
            ("Cooling load", "kWh", 20.0, 180.0),
            ("Heating load", "kWh", 10.0, 150.0),
            ("Grid carbon intensity", "gCO2/kWh", 80.0, 400.0),
        ],
    },
    FeatureTemplate {
        kind: FeatureKind::CropStress,
        slug: "crop_stress",
        title: "Crop Stress",
        icon: "🌾",
        metrics: &[("Growing degree days", "GDD", 200.0, 1200.0), ("Evapotranspiration", "mm", 1.0, 7.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::WildfireRisk,
        slug: "wildfire_risk",
        title: "Wildfire Risk",
        icon: "🚒",
        metrics: &[("Fire weather index", "", 0.0, 50.0), ("Fuel dryness", "%", 20.0, 75.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::SolarPotential,
        slug: "solar_potential",
        title: "Solar Potential",
        icon: "☀️",
        metrics: &[("Irradiance", "kWh/m²", 1.5, 6.0), ("Sunshine hours", "h", 2.0, 11.0)],
    },
    FeatureTemplate {
        kind: FeatureKind::Pollen,
        slug: "pollen",
        title: "Pollen Count",
        icon: "🌼",
        metrics: &[("Tree pollen", "grains/m³", 0.0, 300.0), ("Grass pollen", "grains/m³", 0.0, 150.0)],
    },
];

impl FeatureKind {
    pub fn all() -> impl Iterator<Item = FeatureKind> {
        FEATURES.iter().map(|f| f.kind)
    }

    fn template(&self) -> &'static FeatureTemplate {
        // Every variant has a row; the table test guards this.
        FEATURES
            .iter()
            .find(|f| f.kind == *self)
            .unwrap_or(&FEATURES[0])
    }

    pub fn slug(&self) -> &'static str {
        self.template().slug
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template().title)
    }
}

impl FromStr for FeatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FEATURES
            .iter()
            .find(|f| f.slug == s)
            .map(|f| f.kind)
            .ok_or_else(|| format!("Unknown feature: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureMetric {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCard {
    pub kind: FeatureKind,
    pub title: String,
    pub icon: String,
    pub location: String,
    pub metrics: Vec<FeatureMetric>,
}

/// Generate the mock card for a feature at a location
pub fn generate(kind: FeatureKind, location: &str) -> FeatureCard {
    let template = kind.template();
    let seed = fnv1a(location.trim().to_lowercase().as_bytes()) ^ fnv1a(template.slug.as_bytes());

    let metrics = template
        .metrics
        .iter()
        .enumerate()
        .map(|(i, &(label, unit, base, spread))| {
            let fraction = unit_fraction(seed, i as u64);
            let value = ((base + fraction * spread) * 10.0).round() / 10.0;
            FeatureMetric {
                label: label.to_string(),
                value,
                unit: unit.to_string(),
            }
        })
        .collect();

    FeatureCard {
        kind,
        title: template.title.to_string(),
        icon: template.icon.to_string(),
        location: location.trim().to_string(),
        metrics,
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Deterministic value in [0, 1) for the i-th metric
fn unit_fraction(seed: u64, index: u64) -> f64 {
    // splitmix64 finalizer
    let mut z = seed.wrapping_add((index + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_row() {
        let kinds = [
            FeatureKind::HeatIndex,
            FeatureKind::DroughtRisk,
            FeatureKind::FloodRisk,
            FeatureKind::EnergyDemand,
            FeatureKind::CropStress,
            FeatureKind::WildfireRisk,
            FeatureKind::SolarPotential,
            FeatureKind::Pollen,
        ];
        for kind in kinds {
            assert_eq!(kind.template().kind, kind);
            assert_eq!(kind.slug().parse::<FeatureKind>(), Ok(kind));
        }
        assert_eq!(FeatureKind::all().count(), kinds.len());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(FeatureKind::FloodRisk, "Bangkok");
        let b = generate(FeatureKind::FloodRisk, " bangkok ");
        assert_eq!(a.metrics, b.metrics);
        assert_ne!(a.metrics, generate(FeatureKind::FloodRisk, "Oslo").metrics);
    }

    #[test]
    fn test_values_within_template_range() {
        for kind in FeatureKind::all() {
            let card = generate(kind, "Nairobi");
            for (m, &(_, _, base, spread)) in card.metrics.iter().zip(kind.template().metrics) {
                assert!(m.value >= base - 0.05 && m.value <= base + spread + 0.05, "{}", m.label);
            }
        }
    }

    #[test]
    fn test_unknown_slug() {
        assert!("tornado".parse::<FeatureKind>().is_err());
    }
}
