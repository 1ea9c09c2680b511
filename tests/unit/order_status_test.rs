// Property-based tests for the order status machine and the revenue/count
// classification rules the dashboard relies on.

use proptest::prelude::*;

use elara::modules::orders::models::OrderStatus;

static ALL_STATUSES: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    proptest::sample::select(&ALL_STATUSES[..])
}

#[test]
fn transition_table_is_exactly_the_allowed_set() {
    use OrderStatus::*;

    let allowed = [
        (Pending, Processing),
        (Pending, Cancelled),
        (Processing, Shipped),
        (Processing, Cancelled),
        (Shipped, OutForDelivery),
        (OutForDelivery, Delivered),
    ];

    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            let expected = allowed.contains(&(from, to));
            assert_eq!(
                from.can_transition_to(to),
                expected,
                "{} -> {}",
                from,
                to
            );
        }
    }
}

#[test]
fn terminal_statuses_have_no_way_out() {
    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        assert!(terminal.is_terminal());
        for to in ALL_STATUSES {
            assert!(!terminal.can_transition_to(to), "{} -> {}", terminal, to);
        }
    }
}

proptest! {
    #[test]
    fn only_delivered_accrues_revenue(status in arb_status()) {
        prop_assert_eq!(
            status.contributes_to_revenue(),
            status == OrderStatus::Delivered
        );
    }

    #[test]
    fn only_cancelled_is_excluded_from_the_order_count(status in arb_status()) {
        prop_assert_eq!(
            status.counts_as_order(),
            status != OrderStatus::Cancelled
        );
    }

    #[test]
    fn revenue_implies_counted(status in arb_status()) {
        // Whatever accrues revenue must also count as an order
        if status.contributes_to_revenue() {
            prop_assert!(status.counts_as_order());
        }
    }

    #[test]
    fn no_transition_enters_pending(status in arb_status()) {
        prop_assert!(!status.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn display_and_parse_round_trip(status in arb_status()) {
        use std::str::FromStr;

        prop_assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
    }
}
