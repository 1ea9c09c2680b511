use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::error;

use crate::modules::analytics::models::Period;
use crate::modules::analytics::services::AnalyticsService;

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reporting window: "week", "month" or "year"
    pub period: Period,
}

/// GET /admin/analytics/dashboard
///
/// Any data-access failure is logged server-side and reported as an opaque
/// failure flag; the success shape is never partially populated.
pub async fn get_dashboard(
    service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    match service.dashboard(query.period).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            error!("Failed to build dashboard summary: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Failed to load dashboard analytics"
            }))
        }
    }
}

/// Configure admin analytics routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route("/analytics/dashboard", web::get().to(get_dashboard));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parses_from_query_token() {
        let query: DashboardQuery = serde_json::from_str(r#"{"period": "week"}"#).unwrap();
        assert_eq!(query.period, Period::Week);

        let query: DashboardQuery = serde_json::from_str(r#"{"period": "year"}"#).unwrap();
        assert_eq!(query.period, Period::Year);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let result: Result<DashboardQuery, _> =
            serde_json::from_str(r#"{"period": "quarter"}"#);
        assert!(result.is_err());
    }
}
