use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(AppError::validation(
                "Category name cannot exceed 255 characters",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        })
    }
}

/// Create-category payload (admin)
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}
