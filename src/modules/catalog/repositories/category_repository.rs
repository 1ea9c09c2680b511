use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::Category;

/// Repository for category persistence
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<Category>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Category>>;

    async fn list(&self) -> Result<Vec<Category>>;
}

pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Category '{}' already exists",
                        category.name
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(category.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(categories)
    }
}
