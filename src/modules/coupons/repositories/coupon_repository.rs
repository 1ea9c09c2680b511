use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::coupons::models::Coupon;

/// Repository for coupon persistence
#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn create(&self, coupon: &Coupon) -> Result<Coupon>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Coupon>>;

    async fn set_active(&self, id: &str, active: bool) -> Result<()>;
}

pub struct MySqlCouponRepository {
    pool: MySqlPool,
}

impl MySqlCouponRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponRepository for MySqlCouponRepository {
    async fn create(&self, coupon: &Coupon) -> Result<Coupon> {
        sqlx::query(
            r#"
            INSERT INTO coupons (
                id, code, discount_type, value, min_order_total,
                expires_at, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&coupon.id)
        .bind(&coupon.code)
        .bind(coupon.discount_type)
        .bind(coupon.value)
        .bind(coupon.min_order_total)
        .bind(coupon.expires_at)
        .bind(coupon.active)
        .bind(coupon.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Coupon code '{}' already exists",
                        coupon.code
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(coupon.clone())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT id, code, discount_type, value, min_order_total,
                   expires_at, active, created_at
            FROM coupons
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.trim().to_uppercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(coupon)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT id, code, discount_type, value, min_order_total,
                   expires_at, active, created_at
            FROM coupons
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(coupons)
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE coupons SET active = ? WHERE id = ?
            "#,
        )
        .bind(active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Coupon {}", id)));
        }

        Ok(())
    }
}
