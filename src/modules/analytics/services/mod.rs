mod analytics_service;

pub use analytics_service::{AnalyticsService, LOW_STOCK_THRESHOLD, TOP_LIMIT};
