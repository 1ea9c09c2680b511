use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::cart::models::{CartItem, CartLine};
use crate::modules::cart::repositories::CartRepository;
use crate::modules::catalog::repositories::ProductRepository;

/// Service for cart reads and edits
pub struct CartService {
    cart_repo: Arc<dyn CartRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

/// Cart contents plus the subtotal shown at checkout
#[derive(Debug, serde::Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
}

impl CartService {
    pub fn new(
        cart_repo: Arc<dyn CartRepository>,
        product_repo: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            cart_repo,
            product_repo,
        }
    }

    pub async fn view(&self, customer_id: &str) -> Result<CartView> {
        let items = self.cart_repo.list_with_products(customer_id).await?;
        let subtotal = items.iter().map(CartLine::line_total).sum();

        Ok(CartView { items, subtotal })
    }

    /// Add a product to the cart, merging quantities on repeat adds
    pub async fn add_item(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartView> {
        CartItem::validate_quantity(quantity)?;

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", product_id)))?;

        if product.archived {
            return Err(AppError::validation(format!(
                "Product '{}' is no longer available",
                product.name
            )));
        }

        if quantity > product.stock {
            return Err(AppError::validation(format!(
                "Only {} units of '{}' in stock",
                product.stock, product.name
            )));
        }

        let item = CartItem::new(customer_id.to_string(), product_id.to_string(), quantity)?;
        self.cart_repo.add_or_increment(&item).await?;

        self.view(customer_id).await
    }

    pub async fn set_quantity(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartView> {
        CartItem::validate_quantity(quantity)?;

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", product_id)))?;

        if quantity > product.stock {
            return Err(AppError::validation(format!(
                "Only {} units of '{}' in stock",
                product.stock, product.name
            )));
        }

        self.cart_repo
            .set_quantity(customer_id, product_id, quantity)
            .await?;

        self.view(customer_id).await
    }

    pub async fn remove_item(&self, customer_id: &str, product_id: &str) -> Result<CartView> {
        self.cart_repo.remove(customer_id, product_id).await?;

        self.view(customer_id).await
    }

    pub async fn clear(&self, customer_id: &str) -> Result<()> {
        self.cart_repo.clear(customer_id).await
    }
}
