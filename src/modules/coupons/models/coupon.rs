// Discount codes applied at checkout. The discount math is pure so the
// eligibility and amount rules stay testable without a database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// How a coupon's value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// Percentage of the order subtotal, value in (0, 100]
    Percent,
    /// Flat amount off the subtotal
    Fixed,
}

/// A discount code
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_order_total: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    pub fn new(
        code: String,
        discount_type: DiscountType,
        value: Decimal,
        min_order_total: Decimal,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        Self::validate_code(&code)?;
        Self::validate_value(discount_type, value)?;

        if min_order_total < Decimal::ZERO {
            return Err(AppError::validation(
                "Minimum order total must be non-negative",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            code: code.trim().to_uppercase(),
            discount_type,
            value,
            min_order_total,
            expires_at,
            active: true,
            created_at: Utc::now(),
        })
    }

    /// Discount amount for a given subtotal, rounded to two decimals and
    /// never exceeding the subtotal itself
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount_type {
            DiscountType::Percent => subtotal * self.value / Decimal::from(100),
            DiscountType::Fixed => self.value,
        };

        raw.round_dp(2).min(subtotal).max(Decimal::ZERO)
    }

    /// Eligibility check at apply time
    pub fn validate_for(&self, subtotal: Decimal, now: DateTime<Utc>) -> Result<()> {
        if !self.active {
            return Err(AppError::validation(format!(
                "Coupon '{}' is no longer active",
                self.code
            )));
        }

        if let Some(expires_at) = self.expires_at {
            if now > expires_at {
                return Err(AppError::validation(format!(
                    "Coupon '{}' expired on {}",
                    self.code, expires_at
                )));
            }
        }

        if subtotal < self.min_order_total {
            return Err(AppError::validation(format!(
                "Coupon '{}' requires a minimum order of {}",
                self.code, self.min_order_total
            )));
        }

        Ok(())
    }

    fn validate_code(code: &str) -> Result<()> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Coupon code cannot be empty"));
        }

        if trimmed.len() > 64 {
            return Err(AppError::validation(
                "Coupon code cannot exceed 64 characters",
            ));
        }

        Ok(())
    }

    fn validate_value(discount_type: DiscountType, value: Decimal) -> Result<()> {
        if value <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Discount value must be positive, got: {}",
                value
            )));
        }

        if discount_type == DiscountType::Percent && value > Decimal::from(100) {
            return Err(AppError::validation(format!(
                "Percent discount cannot exceed 100, got: {}",
                value
            )));
        }

        Ok(())
    }
}

/// Create-coupon payload (admin)
#[derive(Debug, Deserialize)]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    #[serde(default)]
    pub min_order_total: Option<Decimal>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn percent_coupon(value: Decimal) -> Coupon {
        Coupon::new("WELCOME10".to_string(), DiscountType::Percent, value, dec!(0), None).unwrap()
    }

    #[test]
    fn test_percent_discount() {
        let coupon = percent_coupon(dec!(10));
        assert_eq!(coupon.discount_for(dec!(200)), dec!(20));
    }

    #[test]
    fn test_percent_discount_rounds_to_cents() {
        let coupon = percent_coupon(dec!(15));
        // 15% of 99.99 = 14.9985 -> 15.00 (banker's rounding on the half cent)
        assert_eq!(coupon.discount_for(dec!(99.99)), dec!(15.00));
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let coupon =
            Coupon::new("FLAT50".to_string(), DiscountType::Fixed, dec!(50), dec!(0), None)
                .unwrap();
        assert_eq!(coupon.discount_for(dec!(30)), dec!(30));
        assert_eq!(coupon.discount_for(dec!(80)), dec!(50));
    }

    #[test]
    fn test_code_is_normalised() {
        let coupon =
            Coupon::new(" spring24 ".to_string(), DiscountType::Fixed, dec!(5), dec!(0), None)
                .unwrap();
        assert_eq!(coupon.code, "SPRING24");
    }

    #[test]
    fn test_rejects_percent_over_100() {
        let result = Coupon::new(
            "TOOMUCH".to_string(),
            DiscountType::Percent,
            dec!(101),
            dec!(0),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_coupon_rejected() {
        let mut coupon = percent_coupon(dec!(10));
        let now = Utc::now();
        coupon.expires_at = Some(now - Duration::hours(1));

        assert!(coupon.validate_for(dec!(100), now).is_err());
    }

    #[test]
    fn test_minimum_order_enforced() {
        let coupon = Coupon::new(
            "BIGSPEND".to_string(),
            DiscountType::Percent,
            dec!(20),
            dec!(150),
            None,
        )
        .unwrap();
        let now = Utc::now();

        assert!(coupon.validate_for(dec!(100), now).is_err());
        assert!(coupon.validate_for(dec!(150), now).is_ok());
    }

    #[test]
    fn test_inactive_coupon_rejected() {
        let mut coupon = percent_coupon(dec!(10));
        coupon.active = false;

        assert!(coupon.validate_for(dec!(100), Utc::now()).is_err());
    }
}
