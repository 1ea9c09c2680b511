// Read-only queries for the dashboard window. Orders and their lines are
// fetched as two flat result sets and stitched in memory, ascending by
// creation time so the aggregation pass walks the window forward.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::analytics::models::{
    LineRecordRow, LowStockProduct, OrderRecord, OrderRecordRow,
};
use crate::modules::customers::models::Role;

/// Repository for dashboard aggregation reads
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Orders created at or after `start`, ascending, with sold lines
    async fn orders_since(&self, start: DateTime<Utc>) -> Result<Vec<OrderRecord>>;

    /// Count of customer accounts created at or after `start`
    async fn new_customers_since(&self, start: DateTime<Utc>) -> Result<i64>;

    /// Non-archived products under `threshold` stock, lowest first
    async fn low_stock_products(&self, threshold: i32, limit: i64)
        -> Result<Vec<LowStockProduct>>;

    /// Ratings of reviews created at or after `start`
    async fn ratings_since(&self, start: DateTime<Utc>) -> Result<Vec<i32>>;
}

pub struct MySqlAnalyticsRepository {
    pool: MySqlPool,
}

impl MySqlAnalyticsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for MySqlAnalyticsRepository {
    async fn orders_since(&self, start: DateTime<Utc>) -> Result<Vec<OrderRecord>> {
        let order_rows = sqlx::query_as::<_, OrderRecordRow>(
            r#"
            SELECT id, total, commission, status, created_at
            FROM orders
            WHERE created_at >= ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let line_rows = sqlx::query_as::<_, LineRecordRow>(
            r#"
            SELECT oi.order_id,
                   oi.product_name,
                   c.name AS category_name,
                   p.gender AS gender,
                   oi.unit_price,
                   oi.quantity
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            LEFT JOIN products p ON p.id = oi.product_id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE o.created_at >= ?
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut lines_by_order: HashMap<String, Vec<LineRecordRow>> = HashMap::new();
        for row in line_rows {
            lines_by_order
                .entry(row.order_id.clone())
                .or_default()
                .push(row);
        }

        let orders = order_rows
            .into_iter()
            .map(|row| {
                let items = lines_by_order
                    .remove(&row.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|line| crate::modules::analytics::models::LineRecord {
                        product_name: line.product_name,
                        category_name: line.category_name,
                        gender: line.gender,
                        unit_price: line.unit_price,
                        quantity: line.quantity,
                    })
                    .collect();

                OrderRecord {
                    id: row.id,
                    total: row.total,
                    commission: row.commission,
                    status: row.status,
                    created_at: row.created_at,
                    items,
                }
            })
            .collect();

        Ok(orders)
    }

    async fn new_customers_since(&self, start: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE role = ? AND created_at >= ?
            "#,
        )
        .bind(Role::Customer)
        .bind(start)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(count)
    }

    async fn low_stock_products(
        &self,
        threshold: i32,
        limit: i64,
    ) -> Result<Vec<LowStockProduct>> {
        let products = sqlx::query_as::<_, LowStockProduct>(
            r#"
            SELECT id, name, stock, price
            FROM products
            WHERE archived = FALSE AND stock < ?
            ORDER BY stock ASC
            LIMIT ?
            "#,
        )
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(products)
    }

    async fn ratings_since(&self, start: DateTime<Utc>) -> Result<Vec<i32>> {
        let ratings = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT rating FROM reviews WHERE created_at >= ?
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(ratings)
    }
}
