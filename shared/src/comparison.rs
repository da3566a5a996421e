//! Multi-location comparison set and table derivation

use crate::format;
use crate::models::{
    ComparisonCell, ComparisonEntry, ComparisonMetric, ComparisonRow, ComparisonTable, Highlight,
    WeatherSnapshot,
};

/// Maximum number of locations compared at once
pub const MAX_COMPARISON_LOCATIONS: usize = 4;

/// The locations currently being compared
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    entries: Vec<ComparisonEntry>,
    last_id: i64,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_COMPARISON_LOCATIONS
    }

    /// Append a location. Returns `None` when the set is full or the name is blank.
    ///
    /// `now_ms` becomes the entry id; ids stay strictly increasing even when
    /// two entries land within the same millisecond.
    pub fn push(&mut self, name: &str, data: WeatherSnapshot, now_ms: i64) -> Option<&ComparisonEntry> {
        let name = name.trim();
        if name.is_empty() || self.is_full() {
            return None;
        }
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.entries.push(ComparisonEntry {
            id,
            name: name.to_string(),
            data,
        });
        self.entries.last()
    }

    /// Remove by id. Returns whether an entry was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn table(&self) -> ComparisonTable {
        build_table(&self.entries)
    }
}

/// Build the comparison table, tagging the highest and lowest value per metric.
///
/// Entries missing a metric take no part in its min/max. When max equals
/// min (one value, or all equal) no cell is tagged.
pub fn build_table(entries: &[ComparisonEntry]) -> ComparisonTable {
    let rows = ComparisonMetric::ALL
        .iter()
        .map(|metric| {
            let values: Vec<Option<f64>> = entries.iter().map(|e| metric.value_of(&e.data)).collect();
            let present = values.iter().flatten().copied();
            let max = present.clone().fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |a| a.max(v)))
            });
            let min = present.fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));

            let cells = entries
                .iter()
                .zip(values)
                .map(|(entry, value)| ComparisonCell {
                    entry_id: entry.id,
                    value,
                    display: display_metric(*metric, value),
                    highlight: highlight_for(value, max, min),
                })
                .collect();

            ComparisonRow {
                metric: *metric,
                label: metric.label().to_string(),
                cells,
            }
        })
        .collect();

    ComparisonTable {
        locations: entries.iter().map(|e| e.name.clone()).collect(),
        rows,
    }
}

fn highlight_for(value: Option<f64>, max: Option<f64>, min: Option<f64>) -> Option<Highlight> {
    let (value, max, min) = (value?, max?, min?);
    if max == min {
        None
    } else if value == max {
        Some(Highlight::Highest)
    } else if value == min {
        Some(Highlight::Lowest)
    } else {
        None
    }
}

fn display_metric(metric: ComparisonMetric, value: Option<f64>) -> String {
    match metric {
        ComparisonMetric::Temperature | ComparisonMetric::FeelsLike => format::temperature(value),
        ComparisonMetric::Humidity => format::humidity(value),
        ComparisonMetric::Pressure => format::pressure(value),
        ComparisonMetric::WindSpeed => format::wind_speed(value),
    }
}
