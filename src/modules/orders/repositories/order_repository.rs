// Provides MySQL persistence for orders and their items.
//
// Checkout is a single transaction: insert the order, insert its items,
// decrement each product's stock, clear the customer's cart. Any failure
// (including insufficient stock) rolls the whole thing back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::orders::models::{Order, OrderItem, OrderStatus};

/// Repository for order persistence
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a checkout atomically: order + items + stock decrement +
    /// cart clear
    async fn create_checkout(&self, order: &Order) -> Result<Order>;

    /// Fetch an order with its items
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>>;

    /// Orders of one customer, newest first, items not populated
    async fn list_by_customer(&self, customer_id: &str, limit: i64, offset: i64)
        -> Result<Vec<Order>>;

    /// All orders, optionally filtered by status, newest first, items not
    /// populated
    async fn list_all(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>>;

    /// Undelivered orders assigned to an agent, oldest first
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Order>>;

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<()>;

    /// Cancel atomically: status change plus restocking of every item
    async fn cancel_and_restock(&self, order: &Order) -> Result<()>;

    async fn assign_agent(&self, id: &str, agent_id: &str) -> Result<()>;

    /// Move to OUT_FOR_DELIVERY and store the confirmation OTP
    async fn start_delivery(&self, id: &str, otp: &str) -> Result<()>;

    /// Move to DELIVERED, write the commission, drop the OTP
    async fn complete_delivery(&self, id: &str, commission: Decimal) -> Result<()>;
}

pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_order(tx: &mut Transaction<'_, MySql>, order: &Order) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, total, discount, commission, status,
                coupon_code, delivery_agent_id, delivery_otp, shipping_address,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total)
        .bind(order.discount)
        .bind(order.commission)
        .bind(order.status)
        .bind(&order.coupon_code)
        .bind(&order.delivery_agent_id)
        .bind(&order.delivery_otp)
        .bind(&order.shipping_address)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    async fn insert_items(tx: &mut Transaction<'_, MySql>, items: &[OrderItem]) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name, unit_price, quantity
                ) VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        }

        Ok(())
    }

    async fn fetch_items(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, product_name, unit_price, quantity
            FROM order_items
            WHERE order_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(items)
    }
}

const ORDER_COLUMNS: &str = "id, customer_id, total, discount, commission, status, \
     coupon_code, delivery_agent_id, delivery_otp, shipping_address, \
     created_at, updated_at";

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create_checkout(&self, order: &Order) -> Result<Order> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start transaction: {}", e)))?;

        Self::insert_order(&mut tx, order).await?;
        Self::insert_items(&mut tx, &order.items).await?;

        // Guarded decrement; zero rows touched means another checkout got
        // there first, so the whole transaction unwinds
        for item in &order.items {
            let result = sqlx::query(
                r#"
                UPDATE products SET stock = stock - ?
                WHERE id = ? AND stock >= ?
                "#,
            )
            .bind(item.quantity)
            .bind(&item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            if result.rows_affected() == 0 {
                return Err(AppError::validation(format!(
                    "Insufficient stock for '{}'",
                    item.product_name
                )));
            }
        }

        sqlx::query("DELETE FROM cart_items WHERE customer_id = ?")
            .bind(&order.customer_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit()
            .await
            .map_err(|e| AppError::internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(order.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE id = ? LIMIT 1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.fetch_items(&order.id).await?;

        Ok(Some(order))
    }

    async fn list_by_customer(
        &self,
        customer_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE customer_id = ? \
             ORDER BY created_at DESC LIMIT ? OFFSET ?",
            ORDER_COLUMNS
        ))
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(orders)
    }

    async fn list_all(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {} FROM orders WHERE status = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    ORDER_COLUMNS
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {} FROM orders ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    ORDER_COLUMNS
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(AppError::Database)?;

        Ok(orders)
    }

    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders \
             WHERE delivery_agent_id = ? AND status IN ('SHIPPED', 'OUT_FOR_DELIVERY') \
             ORDER BY created_at ASC",
            ORDER_COLUMNS
        ))
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(orders)
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?, updated_at = NOW() WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        Ok(())
    }

    async fn cancel_and_restock(&self, order: &Order) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            r#"
            UPDATE orders SET status = ?, updated_at = NOW() WHERE id = ?
            "#,
        )
        .bind(OrderStatus::Cancelled)
        .bind(&order.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for item in &order.items {
            sqlx::query(
                r#"
                UPDATE products SET stock = stock + ? WHERE id = ?
                "#,
            )
            .bind(item.quantity)
            .bind(&item.product_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn assign_agent(&self, id: &str, agent_id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET delivery_agent_id = ?, updated_at = NOW() WHERE id = ?
            "#,
        )
        .bind(agent_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        Ok(())
    }

    async fn start_delivery(&self, id: &str, otp: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?, delivery_otp = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(OrderStatus::OutForDelivery)
        .bind(otp)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        Ok(())
    }

    async fn complete_delivery(&self, id: &str, commission: Decimal) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = ?, commission = ?, delivery_otp = NULL, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(OrderStatus::Delivered)
        .bind(commission)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        Ok(())
    }
}
