// Customer accounts for the storefront, admin console and delivery workflow.
// Passwords are stored as Argon2 hashes; the role decides which surfaces an
// account can reach.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Storefront shopper
    Customer,
    /// Admin console access
    Admin,
    /// Delivery workflow access
    DeliveryAgent,
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "CUSTOMER"),
            Role::Admin => write!(f, "ADMIN"),
            Role::DeliveryAgent => write!(f, "DELIVERY_AGENT"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Role::Customer),
            "ADMIN" => Ok(Role::Admin),
            "DELIVERY_AGENT" => Ok(Role::DeliveryAgent),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Build a new customer account with a pre-hashed password
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Result<Self> {
        Self::validate_name(&name)?;
        Self::validate_email(&email)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: email.to_lowercase(),
            password_hash,
            role,
            created_at: Utc::now(),
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(AppError::validation("Name cannot exceed 255 characters"));
        }

        Ok(())
    }

    fn validate_email(email: &str) -> Result<()> {
        let trimmed = email.trim();
        if trimmed.is_empty() || !trimmed.contains('@') || trimmed.len() > 255 {
            return Err(AppError::validation(format!("Invalid email: '{}'", email)));
        }

        Ok(())
    }
}

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        if self.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        Ok(())
    }
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account shape returned to clients (no password hash)
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            role: customer.role,
            created_at: customer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_creation_valid() {
        let customer = Customer::new(
            "Ada".to_string(),
            "Ada@Elara.Test".to_string(),
            "$argon2id$fake".to_string(),
            Role::Customer,
        )
        .unwrap();

        assert_eq!(customer.email, "ada@elara.test");
        assert_eq!(customer.role, Role::Customer);
        assert!(!customer.id.is_empty());
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Customer::new(
            "  ".to_string(),
            "a@b.test".to_string(),
            "hash".to_string(),
            Role::Customer,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_email() {
        let result = Customer::new(
            "Ada".to_string(),
            "not-an-email".to_string(),
            "hash".to_string(),
            Role::Customer,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_register_request_password_length() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "a@b.test".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "a@b.test".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_role_round_trip() {
        use std::str::FromStr;

        for role in [Role::Customer, Role::Admin, Role::DeliveryAgent] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(Role::from_str("SUPERUSER").is_err());
    }
}
