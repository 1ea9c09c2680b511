// Property-based tests for the coupon discount math.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use elara::modules::coupons::models::{Coupon, DiscountType};

fn percent(value: u32) -> Coupon {
    Coupon::new(
        "PCT".to_string(),
        DiscountType::Percent,
        Decimal::from(value),
        Decimal::ZERO,
        None,
    )
    .unwrap()
}

fn fixed(cents: u64) -> Coupon {
    Coupon::new(
        "FLAT".to_string(),
        DiscountType::Fixed,
        Decimal::new(cents as i64, 2),
        Decimal::ZERO,
        None,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn discount_never_exceeds_subtotal(
        value in 1_u32..=100,
        subtotal_cents in 0_u64..100_000_000,
    ) {
        let subtotal = Decimal::new(subtotal_cents as i64, 2);

        let discount = percent(value).discount_for(subtotal);
        prop_assert!(discount >= Decimal::ZERO);
        prop_assert!(discount <= subtotal);
    }

    #[test]
    fn fixed_discount_is_min_of_value_and_subtotal(
        value_cents in 1_u64..10_000_000,
        subtotal_cents in 0_u64..10_000_000,
    ) {
        let value = Decimal::new(value_cents as i64, 2);
        let subtotal = Decimal::new(subtotal_cents as i64, 2);

        let discount = fixed(value_cents).discount_for(subtotal);
        prop_assert_eq!(discount, value.min(subtotal));
    }

    #[test]
    fn full_percent_discount_clears_the_subtotal(
        subtotal_cents in 0_u64..100_000_000,
    ) {
        let subtotal = Decimal::new(subtotal_cents as i64, 2);
        prop_assert_eq!(percent(100).discount_for(subtotal), subtotal);
    }

    #[test]
    fn discount_is_deterministic(
        value in 1_u32..=100,
        subtotal_cents in 0_u64..100_000_000,
    ) {
        let coupon = percent(value);
        let subtotal = Decimal::new(subtotal_cents as i64, 2);

        prop_assert_eq!(coupon.discount_for(subtotal), coupon.discount_for(subtotal));
    }

    #[test]
    fn expiry_is_a_hard_boundary(offset_hours in 1_i64..1000) {
        let now = Utc::now();
        let mut coupon = percent(10);

        coupon.expires_at = Some(now + Duration::hours(offset_hours));
        prop_assert!(coupon.validate_for(Decimal::from(100), now).is_ok());

        coupon.expires_at = Some(now - Duration::hours(offset_hours));
        prop_assert!(coupon.validate_for(Decimal::from(100), now).is_err());
    }
}

#[test]
fn construction_rejects_out_of_range_percentages() {
    assert!(Coupon::new(
        "X".to_string(),
        DiscountType::Percent,
        Decimal::from(101),
        Decimal::ZERO,
        None
    )
    .is_err());

    assert!(Coupon::new(
        "X".to_string(),
        DiscountType::Percent,
        Decimal::ZERO,
        Decimal::ZERO,
        None
    )
    .is_err());
}
