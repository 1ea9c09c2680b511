use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A cart row: one product with a quantity, unique per (customer, product)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(customer_id: String, product_id: String, quantity: i32) -> Result<Self> {
        Self::validate_quantity(quantity)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        })
    }

    pub fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }
}

/// Cart row joined with live product data, as shown to the customer and
/// consumed by checkout
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub stock: i32,
    pub archived: bool,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Add-to-cart payload
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: String,
    pub quantity: i32,
}

/// Set-quantity payload
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cart_item_requires_positive_quantity() {
        assert!(CartItem::new("c".to_string(), "p".to_string(), 0).is_err());
        assert!(CartItem::new("c".to_string(), "p".to_string(), -2).is_err());
        assert!(CartItem::new("c".to_string(), "p".to_string(), 3).is_ok());
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product_id: "p".to_string(),
            product_name: "Noir Intense".to_string(),
            unit_price: dec!(89.50),
            quantity: 2,
            stock: 10,
            archived: false,
        };
        assert_eq!(line.line_total(), dec!(179.00));
    }
}
