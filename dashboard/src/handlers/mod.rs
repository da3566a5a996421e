//! HTTP request handlers

pub mod comparison;
pub mod dashboard;
pub mod features;
pub mod health;
pub mod history;
pub mod metrics;
pub mod navigator;
pub mod preferences;
pub mod widgets;

pub use comparison::*;
pub use dashboard::*;
pub use features::*;
pub use health::*;
pub use history::*;
pub use metrics::*;
pub use navigator::*;
pub use preferences::*;
pub use widgets::*;
