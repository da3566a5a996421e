//! Domain models for the climate dashboard

mod advisory;
mod comparison;
mod weather;

pub use advisory::*;
pub use comparison::*;
pub use weather::*;
