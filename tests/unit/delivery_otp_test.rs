// Tests for the delivery OTP and the commission written at delivery time.

use proptest::prelude::*;
use rust_decimal::Decimal;

use elara::modules::delivery::services::otp::generate_otp;
use elara::modules::delivery::services::DeliveryService;

#[test]
fn otp_is_always_four_digits_in_range() {
    for _ in 0..1000 {
        let otp = generate_otp();

        assert_eq!(otp.len(), 4);
        let value: u32 = otp.parse().expect("OTP must be numeric");
        assert!((1000..=9999).contains(&value), "out of range: {}", value);
    }
}

#[test]
fn otp_varies_between_draws() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(generate_otp());
    }

    // 200 draws over 9000 codes collapsing to a handful would mean a broken
    // generator
    assert!(seen.len() > 10);
}

proptest! {
    #[test]
    fn commission_is_total_times_rate_rounded_to_cents(
        total_cents in 0_u64..100_000_000,
        rate_percent in 0_u32..100,
    ) {
        let total = Decimal::new(total_cents as i64, 2);
        let rate = Decimal::new(rate_percent as i64, 2);

        let commission = DeliveryService::commission_for(total, rate);

        prop_assert_eq!(commission, (total * rate).round_dp(2));
        prop_assert!(commission >= Decimal::ZERO);
        // Rates below 100% never hand the agent more than the order total
        prop_assert!(commission <= total);
    }

    #[test]
    fn commission_is_monotone_in_the_total(
        smaller_cents in 0_u64..50_000_000,
        delta_cents in 0_u64..50_000_000,
    ) {
        let rate = Decimal::new(10, 2);
        let smaller = Decimal::new(smaller_cents as i64, 2);
        let larger = Decimal::new((smaller_cents + delta_cents) as i64, 2);

        prop_assert!(
            DeliveryService::commission_for(larger, rate)
                >= DeliveryService::commission_for(smaller, rate)
        );
    }
}
