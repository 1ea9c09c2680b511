// Property-based tests for the dashboard aggregation:
// - the chart series length depends only on the calendar, never on data
// - revenue and commission accrue from delivered orders only
// - the order count excludes cancellations
// - average order value relates revenue and order count
// - the status split never carries zero entries
// - the product breakdown is capped at five and sorted by units sold

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use elara::modules::analytics::models::{LineRecord, OrderRecord, Period};
use elara::modules::analytics::services::AnalyticsService;
use elara::modules::orders::models::OrderStatus;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 6, 15, 30, 0).unwrap()
}

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Processing),
        Just(OrderStatus::Shipped),
        Just(OrderStatus::OutForDelivery),
        Just(OrderStatus::Delivered),
        Just(OrderStatus::Cancelled),
    ]
}

fn arb_line() -> impl Strategy<Value = LineRecord> {
    (
        "[A-Z][a-z]{2,8}",
        proptest::option::of("[A-Z][a-z]{2,8}"),
        1_u64..100_000,
        1_i32..10,
    )
        .prop_map(|(name, category, price_cents, quantity)| LineRecord {
            product_name: name,
            category_name: category,
            gender: None,
            unit_price: Decimal::new(price_cents as i64, 2),
            quantity,
        })
}

fn arb_order() -> impl Strategy<Value = OrderRecord> {
    (
        arb_status(),
        0_u64..10_000_000,
        0_u64..1_000_000,
        0_i64..(7 * 24 * 3600),
        proptest::collection::vec(arb_line(), 0..4),
    )
        .prop_map(|(status, total_cents, commission_cents, age_secs, items)| OrderRecord {
            id: Uuid::new_v4().to_string(),
            total: Decimal::new(total_cents as i64, 2),
            commission: Decimal::new(commission_cents as i64, 2),
            status,
            created_at: fixed_now() - Duration::seconds(age_secs),
            items,
        })
}

proptest! {
    #[test]
    fn chart_length_depends_only_on_the_calendar(
        orders in proptest::collection::vec(arb_order(), 0..40),
        period_idx in 0_usize..3,
    ) {
        let period = [Period::Week, Period::Month, Period::Year][period_idx];
        let now = fixed_now();

        let with_data = AnalyticsService::aggregate(period, now, &orders, 0, vec![], &[]);
        let without_data = AnalyticsService::aggregate(period, now, &[], 0, vec![], &[]);

        prop_assert_eq!(with_data.chart_data.len(), without_data.chart_data.len());
        prop_assert!(!with_data.chart_data.is_empty());
    }

    #[test]
    fn revenue_accrues_from_delivered_orders_only(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        let expected_revenue: Decimal = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(|o| o.total)
            .sum();
        let expected_commission: Decimal = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(|o| o.commission)
            .sum();

        prop_assert_eq!(summary.total_revenue, expected_revenue);
        prop_assert_eq!(summary.total_commissions, expected_commission);
    }

    #[test]
    fn order_count_excludes_cancellations(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        let expected = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .count() as i64;

        prop_assert_eq!(summary.total_orders, expected);
    }

    #[test]
    fn average_order_value_relates_revenue_and_count(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        if summary.total_orders > 0 {
            prop_assert_eq!(
                summary.average_order_value,
                summary.total_revenue / Decimal::from(summary.total_orders)
            );
        } else {
            prop_assert_eq!(summary.average_order_value, Decimal::ZERO);
        }
    }

    #[test]
    fn status_split_never_carries_zero_entries(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        prop_assert!(summary.status_data.iter().all(|s| s.value > 0));
        prop_assert!(summary.status_data.len() <= 2);
        for slice in &summary.status_data {
            prop_assert!(slice.name == "Completed" || slice.name == "Cancelled");
        }
    }

    #[test]
    fn product_breakdown_is_capped_and_sorted(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        prop_assert!(summary.product_data.len() <= 5);
        for pair in summary.product_data.windows(2) {
            prop_assert!(pair[0].sales >= pair[1].sales);
        }
    }

    #[test]
    fn chart_buckets_sum_to_delivered_revenue(
        orders in proptest::collection::vec(arb_order(), 0..40),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &orders, 0, vec![], &[]);

        let charted: Decimal = summary.chart_data.iter().map(|p| p.revenue).sum();
        let charted_orders: i64 = summary.chart_data.iter().map(|p| p.orders).sum();
        let delivered = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count() as i64;

        prop_assert_eq!(charted, summary.total_revenue);
        prop_assert_eq!(charted_orders, delivered);
    }

    #[test]
    fn aggregation_is_a_pure_function(
        orders in proptest::collection::vec(arb_order(), 0..20),
        ratings in proptest::collection::vec(1_i32..=5, 0..20),
    ) {
        let first = AnalyticsService::aggregate(Period::Month, fixed_now(), &orders, 7, vec![], &ratings);
        let second = AnalyticsService::aggregate(Period::Month, fixed_now(), &orders, 7, vec![], &ratings);

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn rating_histogram_accounts_for_every_review(
        ratings in proptest::collection::vec(1_i32..=5, 0..50),
    ) {
        let summary = AnalyticsService::aggregate(Period::Week, fixed_now(), &[], 0, vec![], &ratings);

        prop_assert_eq!(summary.total_reviews, ratings.len() as i64);
        prop_assert_eq!(summary.rating_distribution.len(), 5);

        let histogram_total: i64 = summary.rating_distribution.iter().map(|b| b.count).sum();
        prop_assert_eq!(histogram_total, ratings.len() as i64);

        // Fixed 5 -> 1 order
        let stars: Vec<i32> = summary.rating_distribution.iter().map(|b| b.rating).collect();
        prop_assert_eq!(stars, vec![5, 4, 3, 2, 1]);
    }
}
