use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, Role};

/// Repository for account persistence
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// List accounts with a given role, newest first
    async fn list_by_role(&self, role: Role, limit: i64, offset: i64) -> Result<Vec<Customer>>;
}

pub struct MySqlCustomerRepository {
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<Customer> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(customer.role)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "An account with email '{}' already exists",
                        customer.email
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(customer.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM customers
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(customer)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM customers
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(customer)
    }

    async fn list_by_role(&self, role: Role, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM customers
            WHERE role = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(role)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(customers)
    }
}
