use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::reviews::models::Review;

/// Repository for review persistence
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<Review>;

    async fn list_by_product(&self, product_id: &str, limit: i64, offset: i64)
        -> Result<Vec<Review>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, product_id, customer_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.id)
        .bind(&review.product_id)
        .bind(&review.customer_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(review.clone())
    }

    async fn list_by_product(
        &self,
        product_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, product_id, customer_id, rating, comment, created_at
            FROM reviews
            WHERE product_id = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(reviews)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM reviews WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Review {}", id)));
        }

        Ok(())
    }
}
