use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::catalog::repositories::ProductRepository;
use crate::modules::reviews::models::{CreateReviewRequest, Review};
use crate::modules::reviews::repositories::ReviewRepository;

/// Service for product reviews
pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        product_repo: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            review_repo,
            product_repo,
        }
    }

    /// Leave a review on a product
    pub async fn create(
        &self,
        product_id: &str,
        customer_id: &str,
        request: CreateReviewRequest,
    ) -> Result<Review> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", product_id)))?;

        let review = Review::new(
            product_id.to_string(),
            customer_id.to_string(),
            request.rating,
            request.comment,
        )?;

        self.review_repo.create(&review).await
    }

    pub async fn list_for_product(
        &self,
        product_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>> {
        self.review_repo
            .list_by_product(product_id, limit, offset)
            .await
    }

    /// Remove a review (admin)
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.review_repo.delete(id).await
    }
}
