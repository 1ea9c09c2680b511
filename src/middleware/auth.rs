use actix_session::SessionExt;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use argon2::{PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::modules::customers::models::Role;

/// Session key holding the signed-in account id
pub const SESSION_ACCOUNT_KEY: &str = "account_id";

/// Account resolved from the session cookie, available to handlers
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthenticatedAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedAccount {
    /// Admins pass every role gate; everyone else needs an exact match
    pub fn require_role(&self, role: Role) -> crate::core::Result<()> {
        if self.role == role || self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Requires {} role",
                role
            )))
        }
    }
}

async fn load_account(pool: &MySqlPool, account_id: &str) -> crate::core::Result<AuthenticatedAccount> {
    sqlx::query_as::<_, AuthenticatedAccount>(
        r#"
        SELECT id, name, email, role
        FROM customers
        WHERE id = ?
        LIMIT 1
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Session account no longer exists"))
}

/// Session-cookie authentication middleware
///
/// Resolves the account referenced by the session on every request, optionally
/// enforces a role, and stores the account in request extensions for handlers.
pub struct SessionAuth {
    pool: MySqlPool,
    required_role: Option<Role>,
}

impl SessionAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            required_role: None,
        }
    }

    pub fn with_role(pool: MySqlPool, role: Role) -> Self {
        Self {
            pool,
            required_role: Some(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
            required_role: self.required_role,
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
    required_role: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();
        let required_role = self.required_role;

        Box::pin(async move {
            let account_id = req
                .get_session()
                .get::<String>(SESSION_ACCOUNT_KEY)
                .ok()
                .flatten()
                .ok_or_else(|| Error::from(AppError::unauthorized("Not signed in")))?;

            let account = load_account(&pool, &account_id).await.map_err(Error::from)?;

            if let Some(role) = required_role {
                account.require_role(role).map_err(Error::from)?;
            }

            req.extensions_mut().insert(account);

            svc.call(req).await
        })
    }
}

/// Extractor handing the signed-in account to a handler
///
/// Uses the account resolved by [`SessionAuth`] when the route is wrapped by
/// it, and falls back to resolving the session itself otherwise.
pub struct CurrentUser(pub AuthenticatedAccount);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let cached = req.extensions().get::<AuthenticatedAccount>().cloned();
            if let Some(account) = cached {
                return Ok(CurrentUser(account));
            }

            let account_id = req
                .get_session()
                .get::<String>(SESSION_ACCOUNT_KEY)
                .ok()
                .flatten()
                .ok_or_else(|| Error::from(AppError::unauthorized("Not signed in")))?;

            let pool = req
                .app_data::<web::Data<MySqlPool>>()
                .ok_or_else(|| Error::from(AppError::internal("Database pool not configured")))?;

            let account = load_account(pool.get_ref(), &account_id)
                .await
                .map_err(Error::from)?;

            Ok(CurrentUser(account))
        })
    }
}

/// Hash a password with Argon2
pub fn hash_password(password: &str) -> crate::core::Result<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against an Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    let argon2 = argon2::Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "midnight-amber-42";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_role_gate() {
        let account = AuthenticatedAccount {
            id: "acc-1".to_string(),
            name: "Test".to_string(),
            email: "test@elara.test".to_string(),
            role: Role::Customer,
        };
        assert!(account.require_role(Role::Customer).is_ok());
        assert!(account.require_role(Role::Admin).is_err());
        assert!(account.require_role(Role::DeliveryAgent).is_err());
    }

    #[test]
    fn test_admin_passes_every_gate() {
        let account = AuthenticatedAccount {
            id: "acc-2".to_string(),
            name: "Admin".to_string(),
            email: "admin@elara.test".to_string(),
            role: Role::Admin,
        };
        assert!(account.require_role(Role::Customer).is_ok());
        assert!(account.require_role(Role::DeliveryAgent).is_ok());
        assert!(account.require_role(Role::Admin).is_ok());
    }
}
