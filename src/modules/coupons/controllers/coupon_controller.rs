use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::coupons::models::CreateCouponRequest;
use crate::modules::coupons::services::CouponService;

#[derive(Debug, Deserialize)]
pub struct ListCouponsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Payload for checking a code against the current cart subtotal
#[derive(Debug, Deserialize)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ValidateCouponResponse {
    pub code: String,
    pub discount: Decimal,
}

/// Create a coupon
/// POST /admin/coupons
pub async fn create_coupon(
    service: web::Data<Arc<CouponService>>,
    request: web::Json<CreateCouponRequest>,
) -> Result<HttpResponse, AppError> {
    let coupon = service.create(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(coupon))
}

/// List coupons
/// GET /admin/coupons
pub async fn list_coupons(
    service: web::Data<Arc<CouponService>>,
    query: web::Query<ListCouponsQuery>,
) -> Result<HttpResponse, AppError> {
    let coupons = service.list(query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(coupons))
}

/// Deactivate a coupon
/// POST /admin/coupons/{id}/deactivate
pub async fn deactivate_coupon(
    service: web::Data<Arc<CouponService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.deactivate(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Check a coupon against a subtotal without placing an order
/// POST /coupons/validate
pub async fn validate_coupon(
    service: web::Data<Arc<CouponService>>,
    request: web::Json<ValidateCouponRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let (coupon, discount) = service.apply(&request.code, request.subtotal).await?;

    Ok(HttpResponse::Ok().json(ValidateCouponResponse {
        code: coupon.code,
        discount,
    }))
}

/// Configure public coupon routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/coupons/validate", web::post().to(validate_coupon));
}

/// Configure admin coupon routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::post().to(create_coupon))
            .route("", web::get().to(list_coupons))
            .route("/{id}/deactivate", web::post().to(deactivate_coupon)),
    );
}
