use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{Product, ProductFilter};

/// Repository for product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<Product>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;

    async fn update(&self, product: &Product) -> Result<Product>;

    async fn set_archived(&self, id: &str, archived: bool) -> Result<()>;

    async fn list(&self, filter: &ProductFilter, limit: i64, offset: i64) -> Result<Vec<Product>>;
}

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn create(&self, product: &Product) -> Result<Product> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, stock, category_id, gender,
                archived, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category_id)
        .bind(product.gender)
        .bind(product.archived)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(product.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock, category_id, gender,
                   archived, created_at, updated_at
            FROM products
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, stock = ?,
                category_id = ?, gender = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category_id)
        .bind(product.gender)
        .bind(product.updated_at)
        .bind(&product.id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {}", product.id)));
        }

        Ok(product.clone())
    }

    async fn set_archived(&self, id: &str, archived: bool) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET archived = ?, updated_at = NOW() WHERE id = ?
            "#,
        )
        .bind(archived)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {}", id)));
        }

        Ok(())
    }

    async fn list(&self, filter: &ProductFilter, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, name, description, price, stock, category_id, gender, \
             archived, created_at, updated_at FROM products WHERE 1 = 1",
        );

        if !filter.include_archived {
            builder.push(" AND archived = FALSE");
        }

        if let Some(category_id) = &filter.category_id {
            builder.push(" AND category_id = ").push_bind(category_id);
        }

        if let Some(gender) = filter.gender {
            builder.push(" AND gender = ").push_bind(gender);
        }

        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(products)
    }
}
