//! Input validation for locations

use rust_decimal::Decimal;

use crate::types::{City, GeoPoint};

/// Message shown when a city cannot be loaded at all
pub const INVALID_CITY: &str = "Invalid city data";

const MAX_NAME_LENGTH: usize = 100;

/// Validate a location name typed by the user
pub fn validate_location_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Location name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Location name is too long");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("Location name contains control characters");
    }
    Ok(())
}

/// Validate latitude/longitude ranges
pub fn validate_coordinates(point: &GeoPoint) -> Result<(), &'static str> {
    if point.latitude < Decimal::from(-90) || point.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if point.longitude < Decimal::from(-180) || point.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a city before any network call is made
pub fn validate_city(city: &City) -> Result<(), &'static str> {
    validate_location_name(&city.name)?;
    if let Some(point) = &city.coordinates {
        validate_coordinates(point)?;
    }
    Ok(())
}
