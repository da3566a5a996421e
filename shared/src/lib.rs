//! Shared types and logic for the Climate Dashboard
//!
//! This crate holds everything that does not touch the network: domain
//! models, the location navigator, derived metrics, advisory rules, the
//! comparison table and the search history. It is used by the dashboard
//! service and, through WASM, by the browser.

pub mod advisories;
pub mod comparison;
pub mod envelope;
pub mod features;
pub mod format;
pub mod geo;
pub mod history;
pub mod metrics;
pub mod models;
pub mod navigator;
pub mod storage;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
