use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::coupons::models::{Coupon, CreateCouponRequest};
use crate::modules::coupons::repositories::CouponRepository;

/// Service for coupon management and apply-time validation
pub struct CouponService {
    coupon_repo: Arc<dyn CouponRepository>,
}

impl CouponService {
    pub fn new(coupon_repo: Arc<dyn CouponRepository>) -> Self {
        Self { coupon_repo }
    }

    /// Create a coupon (admin)
    pub async fn create(&self, request: CreateCouponRequest) -> Result<Coupon> {
        let coupon = Coupon::new(
            request.code,
            request.discount_type,
            request.value,
            request.min_order_total.unwrap_or(Decimal::ZERO),
            request.expires_at,
        )?;

        let created = self.coupon_repo.create(&coupon).await?;

        info!(code = %created.code, "Created coupon");

        Ok(created)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Coupon>> {
        self.coupon_repo.list(limit, offset).await
    }

    /// Deactivate a coupon (admin)
    pub async fn deactivate(&self, id: &str) -> Result<()> {
        self.coupon_repo.set_active(id, false).await
    }

    /// Resolve a code and compute the discount it grants for a subtotal
    ///
    /// Returns the coupon and the discount amount; fails if the code is
    /// unknown, inactive, expired or below its minimum order total.
    pub async fn apply(&self, code: &str, subtotal: Decimal) -> Result<(Coupon, Decimal)> {
        let coupon = self
            .coupon_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Coupon '{}'", code)))?;

        coupon.validate_for(subtotal, Utc::now())?;

        let discount = coupon.discount_for(subtotal);

        Ok((coupon, discount))
    }
}
