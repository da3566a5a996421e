//! Business logic services for the Climate Dashboard

pub mod comparison;
pub mod dashboard;
pub mod history;
pub mod widgets;

pub use comparison::ComparisonService;
pub use dashboard::DashboardService;
pub use history::{HistoryService, PreferenceService};
pub use widgets::WidgetService;
