//! Presentation formatting for optional readings

/// Placeholder shown for any value the API did not report
pub const MISSING: &str = "N/A";

/// Format an optional number with fixed precision and a unit suffix
pub fn display_value(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if unit.is_empty() {
                format!("{:.*}", decimals, v)
            } else if unit.starts_with('°') || unit == "%" {
                format!("{:.*}{}", decimals, v, unit)
            } else {
                format!("{:.*} {}", decimals, v, unit)
            }
        }
        _ => MISSING.to_string(),
    }
}

/// Format an optional piece of text
pub fn display_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING.to_string(),
    }
}

pub fn temperature(value: Option<f64>) -> String {
    display_value(value, 1, "°C")
}

pub fn humidity(value: Option<f64>) -> String {
    display_value(value, 0, "%")
}

pub fn pressure(value: Option<f64>) -> String {
    display_value(value, 0, "hPa")
}

pub fn wind_speed(value: Option<f64>) -> String {
    display_value(value, 1, "m/s")
}
