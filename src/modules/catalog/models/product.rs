// Products are never deleted, only archived, so order line items can keep
// pointing at them. Price and stock live here; checkout snapshots the price
// onto the order item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Gender tag on a fragrance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unisex
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "MEN"),
            Gender::Women => write!(f, "WOMEN"),
            Gender::Unisex => write!(f, "UNISEX"),
        }
    }
}

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<String>,
    /// Absent tag reads as UNISEX everywhere a gender is needed
    pub gender: Option<Gender>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        description: Option<String>,
        price: Decimal,
        stock: i32,
        category_id: Option<String>,
        gender: Option<Gender>,
    ) -> Result<Self> {
        let now = Utc::now();

        let product = Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            price,
            stock,
            category_id,
            gender,
            archived: false,
            created_at: now,
            updated_at: now,
        };
        product.validate()?;

        Ok(product)
    }

    /// Model invariants, re-checked after admin edits
    pub fn validate(&self) -> Result<()> {
        Self::validate_name(&self.name)?;
        Self::validate_price(self.price)?;
        Self::validate_stock(self.stock)?;

        Ok(())
    }

    pub fn gender_or_default(&self) -> Gender {
        self.gender.unwrap_or_default()
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(AppError::validation(
                "Product name cannot exceed 255 characters",
            ));
        }

        Ok(())
    }

    fn validate_price(price: Decimal) -> Result<()> {
        if price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Price must be non-negative, got: {}",
                price
            )));
        }

        Ok(())
    }

    fn validate_stock(stock: i32) -> Result<()> {
        if stock < 0 {
            return Err(AppError::validation(format!(
                "Stock must be non-negative, got: {}",
                stock
            )));
        }

        Ok(())
    }
}

/// Create-product payload (admin)
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Update-product payload (admin); omitted fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Storefront listing filters
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub include_archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_creation_valid() {
        let product = Product::new(
            "Noir Intense".to_string(),
            Some("Amber and oud".to_string()),
            dec!(89.50),
            20,
            None,
            Some(Gender::Men),
        )
        .unwrap();

        assert_eq!(product.price, dec!(89.50));
        assert!(!product.archived);
        assert_eq!(product.gender_or_default(), Gender::Men);
    }

    #[test]
    fn test_missing_gender_reads_as_unisex() {
        let product = Product::new(
            "Eau Fraiche".to_string(),
            None,
            dec!(45),
            5,
            None,
            None,
        )
        .unwrap();

        assert_eq!(product.gender_or_default(), Gender::Unisex);
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Product::new("X".to_string(), None, dec!(-1), 1, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_stock() {
        let result = Product::new("X".to_string(), None, dec!(1), -1, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        let result = Product::new("   ".to_string(), None, dec!(1), 1, None, None);
        assert!(result.is_err());
    }
}
