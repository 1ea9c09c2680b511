use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::cart::models::{CartItem, CartLine};

/// Repository for cart persistence
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert the row, or add to the quantity when the product is already
    /// in the cart
    async fn add_or_increment(&self, item: &CartItem) -> Result<()>;

    async fn set_quantity(&self, customer_id: &str, product_id: &str, quantity: i32)
        -> Result<()>;

    async fn remove(&self, customer_id: &str, product_id: &str) -> Result<()>;

    async fn clear(&self, customer_id: &str) -> Result<()>;

    /// Cart rows joined with live product name, price, stock and archive flag
    async fn list_with_products(&self, customer_id: &str) -> Result<Vec<CartLine>>;
}

pub struct MySqlCartRepository {
    pool: MySqlPool,
}

impl MySqlCartRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn add_or_increment(&self, item: &CartItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, customer_id, product_id, quantity, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE quantity = quantity + VALUES(quantity)
            "#,
        )
        .bind(&item.id)
        .bind(&item.customer_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    async fn set_quantity(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE cart_items SET quantity = ?
            WHERE customer_id = ? AND product_id = ?
            "#,
        )
        .bind(quantity)
        .bind(customer_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Cart item for product {}",
                product_id
            )));
        }

        Ok(())
    }

    async fn remove(&self, customer_id: &str, product_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM cart_items WHERE customer_id = ? AND product_id = ?
            "#,
        )
        .bind(customer_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    async fn clear(&self, customer_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM cart_items WHERE customer_id = ?
            "#,
        )
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    async fn list_with_products(&self, customer_id: &str) -> Result<Vec<CartLine>> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.product_id,
                   p.name AS product_name,
                   p.price AS unit_price,
                   ci.quantity,
                   p.stock,
                   p.archived
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.customer_id = ?
            ORDER BY ci.created_at ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(lines)
    }
}
