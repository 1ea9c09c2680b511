// Orders carry price snapshots in their items so later catalog edits never
// rewrite history. Once DELIVERED an order is immutable apart from the
// commission written at delivery time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Order fulfilment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the store
    Pending,
    /// Being prepared
    Processing,
    /// Handed to logistics
    Shipped,
    /// Agent is on the way, OTP issued
    OutForDelivery,
    /// Confirmed received; commission written
    Delivered,
    /// Terminated before fulfilment
    Cancelled,
}

impl OrderStatus {
    /// Only delivered orders accrue revenue and commission
    pub fn contributes_to_revenue(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Everything except a cancellation counts as an order
    pub fn counts_as_order(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled)
    }

    /// Valid forward transitions
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, OutForDelivery)
                | (OutForDelivery, Delivered)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Processing => write!(f, "PROCESSING"),
            OrderStatus::Shipped => write!(f, "SHIPPED"),
            OrderStatus::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "OUT_FOR_DELIVERY" => Ok(OrderStatus::OutForDelivery),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// A single product position on an order, with snapshots taken at checkout
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Name at purchase time
    pub product_name: String,
    /// Price at purchase time, decoupled from the live product price
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    /// Amount charged: item subtotal minus discount
    pub total: Decimal,
    pub discount: Decimal,
    /// Delivery-agent commission, written when the order is delivered
    pub commission: Decimal,
    pub status: OrderStatus,
    pub coupon_code: Option<String>,
    pub delivery_agent_id: Option<String>,
    #[serde(skip_serializing)]
    pub delivery_otp: Option<String>,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Joined from order_items, not a column
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Build an order from checkout lines
    ///
    /// # Arguments
    /// * `customer_id` - Owning account
    /// * `shipping_address` - Free-form destination text
    /// * `items` - Snapshot lines (must not be empty)
    /// * `discount` - Amount already validated against the subtotal
    /// * `coupon_code` - Code that produced the discount, if any
    pub fn new(
        customer_id: String,
        shipping_address: String,
        items: Vec<OrderItem>,
        discount: Decimal,
        coupon_code: Option<String>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(AppError::validation("Order must have at least one item"));
        }

        if shipping_address.trim().is_empty() {
            return Err(AppError::validation("Shipping address cannot be empty"));
        }

        let subtotal: Decimal = items.iter().map(OrderItem::line_total).sum();
        if discount < Decimal::ZERO || discount > subtotal {
            return Err(AppError::validation(format!(
                "Discount {} is outside [0, {}]",
                discount, subtotal
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let items = items
            .into_iter()
            .map(|item| OrderItem {
                order_id: id.clone(),
                ..item
            })
            .collect();

        Ok(Self {
            id,
            customer_id,
            total: subtotal - discount,
            discount,
            commission: Decimal::ZERO,
            status: OrderStatus::Pending,
            coupon_code,
            delivery_agent_id: None,
            delivery_otp: None,
            shipping_address,
            created_at: now,
            updated_at: now,
            items,
        })
    }

    /// Move to a new status, enforcing the transition table
    pub fn update_status(&mut self, new_status: OrderStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                self.status, new_status
            )));
        }

        self.status = new_status;
        self.updated_at = Utc::now();

        Ok(())
    }
}

/// Checkout payload
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: String,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Admin status-change payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(name: &str, price: Decimal, quantity: i32) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: String::new(),
            product_id: Uuid::new_v4().to_string(),
            product_name: name.to_string(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_order_total_is_subtotal_minus_discount() {
        let order = Order::new(
            "cust-1".to_string(),
            "1 Rue de Rivoli, Paris".to_string(),
            vec![item("Noir Intense", dec!(89.50), 2), item("Eau Fraiche", dec!(45), 1)],
            dec!(24),
            Some("WELCOME10".to_string()),
        )
        .unwrap();

        // (2 * 89.50) + 45 = 224, minus 24
        assert_eq!(order.total, dec!(200));
        assert_eq!(order.discount, dec!(24));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.commission, Decimal::ZERO);
    }

    #[test]
    fn test_items_take_the_order_id() {
        let order = Order::new(
            "cust-1".to_string(),
            "somewhere".to_string(),
            vec![item("Noir Intense", dec!(10), 1)],
            dec!(0),
            None,
        )
        .unwrap();

        assert!(order.items.iter().all(|i| i.order_id == order.id));
    }

    #[test]
    fn test_rejects_empty_items() {
        let result = Order::new(
            "cust-1".to_string(),
            "somewhere".to_string(),
            vec![],
            dec!(0),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_discount_above_subtotal() {
        let result = Order::new(
            "cust-1".to_string(),
            "somewhere".to_string(),
            vec![item("Noir Intense", dec!(10), 1)],
            dec!(11),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_full_lifecycle_transitions() {
        let mut order = Order::new(
            "cust-1".to_string(),
            "somewhere".to_string(),
            vec![item("Noir Intense", dec!(10), 1)],
            dec!(0),
            None,
        )
        .unwrap();

        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert!(order.update_status(status).is_ok());
        }

        // Terminal: nothing may follow DELIVERED
        assert!(order.update_status(OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn test_cancel_only_before_shipping() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_no_skipping_fulfilment_steps() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::OutForDelivery));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_revenue_classification() {
        assert!(OrderStatus::Delivered.contributes_to_revenue());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Cancelled,
        ] {
            assert!(!status.contributes_to_revenue(), "{} should not accrue", status);
        }
    }

    #[test]
    fn test_order_count_classification() {
        assert!(!OrderStatus::Cancelled.counts_as_order());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert!(status.counts_as_order(), "{} should count", status);
        }
    }

    #[test]
    fn test_status_round_trip() {
        use std::str::FromStr;

        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }
}
