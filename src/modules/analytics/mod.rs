// Analytics module: the admin dashboard aggregation pipeline
// (fetch -> single-pass fold -> calendar gap fill -> chart shapes)

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DashboardSummary, Period};
pub use repositories::{AnalyticsRepository, MySqlAnalyticsRepository};
pub use services::AnalyticsService;
