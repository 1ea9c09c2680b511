// Row shapes fetched for the dashboard window. Only the fields the
// aggregation reads are selected; line records carry the purchase-time
// price snapshot, with category and gender joined from the live catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::modules::catalog::models::Gender;
use crate::modules::orders::models::OrderStatus;

/// An order inside the reporting window, with its sold lines
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: String,
    pub total: Decimal,
    pub commission: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineRecord>,
}

/// One sold line of an order in the window
#[derive(Debug, Clone)]
pub struct LineRecord {
    /// Name snapshot taken at checkout
    pub product_name: String,
    /// Live category name; None displays as "Uncategorized"
    pub category_name: Option<String>,
    /// Live gender tag; None reads as UNISEX
    pub gender: Option<Gender>,
    /// Price snapshot taken at checkout
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl LineRecord {
    pub fn revenue(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Flat order row as selected from the database
#[derive(Debug, Clone, FromRow)]
pub struct OrderRecordRow {
    pub id: String,
    pub total: Decimal,
    pub commission: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Flat line row as selected from the database, keyed back to its order
#[derive(Debug, Clone, FromRow)]
pub struct LineRecordRow {
    pub order_id: String,
    pub product_name: String,
    pub category_name: Option<String>,
    pub gender: Option<Gender>,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// A product running low on stock
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LowStockProduct {
    pub id: String,
    pub name: String,
    pub stock: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_revenue_uses_snapshot_price() {
        let line = LineRecord {
            product_name: "Noir Intense".to_string(),
            category_name: None,
            gender: None,
            unit_price: dec!(89.50),
            quantity: 3,
        };
        assert_eq!(line.revenue(), dec!(268.50));
    }
}
