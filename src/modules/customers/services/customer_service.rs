use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::middleware::auth::{hash_password, verify_password};
use crate::modules::customers::models::{Customer, LoginRequest, RegisterRequest, Role};
use crate::modules::customers::repositories::CustomerRepository;

/// Service for account registration and sign-in
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    /// Register a new storefront account
    ///
    /// Email must be unused; the password is hashed with Argon2 before it
    /// ever reaches the repository.
    pub async fn register(&self, request: RegisterRequest) -> Result<Customer> {
        request.validate()?;

        if self
            .customer_repo
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "An account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let customer = Customer::new(request.name, request.email, password_hash, Role::Customer)?;

        let created = self.customer_repo.create(&customer).await?;

        info!(customer_id = %created.id, "Registered new customer");

        Ok(created)
    }

    /// Verify credentials and return the matching account
    ///
    /// A missing account and a wrong password produce the same error, so the
    /// response does not leak which emails exist.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<Customer> {
        let customer = self
            .customer_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&request.password, &customer.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(customer)
    }

    /// Fetch an account by id
    pub async fn get(&self, id: &str) -> Result<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {}", id)))
    }

    /// List delivery agents for the admin assignment picker
    pub async fn list_delivery_agents(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        self.customer_repo
            .list_by_role(Role::DeliveryAgent, limit, offset)
            .await
    }
}
