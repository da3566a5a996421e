//! External API integrations

pub mod climate_api;

pub use climate_api::{ClimateApi, ClimateClient};
