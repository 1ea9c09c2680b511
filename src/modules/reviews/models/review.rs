use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A product review with a 1-5 star rating
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub customer_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        product_id: String,
        customer_id: String,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Self> {
        Self::validate_rating(rating)?;

        if let Some(comment) = &comment {
            if comment.len() > 2000 {
                return Err(AppError::validation(
                    "Comment cannot exceed 2000 characters",
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            customer_id,
            rating,
            comment,
            created_at: Utc::now(),
        })
    }

    pub fn validate_rating(rating: i32) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation(format!(
                "Rating must be between 1 and 5, got: {}",
                rating
            )));
        }

        Ok(())
    }
}

/// Create-review payload
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_creation_valid() {
        let review = Review::new(
            "prod-1".to_string(),
            "cust-1".to_string(),
            4,
            Some("Lovely sillage".to_string()),
        )
        .unwrap();

        assert_eq!(review.rating, 4);
        assert!(!review.id.is_empty());
    }

    #[test]
    fn test_rating_bounds() {
        for rating in [1, 2, 3, 4, 5] {
            assert!(Review::validate_rating(rating).is_ok());
        }
        for rating in [0, 6, -1, 100] {
            assert!(Review::validate_rating(rating).is_err());
        }
    }
}
