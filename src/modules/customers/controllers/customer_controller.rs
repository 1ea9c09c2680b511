use std::sync::Arc;

use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::{CurrentUser, SESSION_ACCOUNT_KEY};
use crate::modules::customers::models::{CustomerResponse, LoginRequest, RegisterRequest};
use crate::modules::customers::services::CustomerService;

/// Register a new account
/// POST /auth/register
pub async fn register(
    service: web::Data<Arc<CustomerService>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// Sign in and open a session
/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<CustomerService>>,
    session: Session,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service.authenticate(request.into_inner()).await?;

    session.renew();
    session
        .insert(SESSION_ACCOUNT_KEY, customer.id.clone())
        .map_err(|e| AppError::internal(format!("Failed to write session: {}", e)))?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// Close the current session
/// POST /auth/logout
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Current account profile
/// GET /auth/me
pub async fn me(
    service: web::Data<Arc<CustomerService>>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let customer = service.get(&user.0.id).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[derive(Debug, serde::Deserialize)]
pub struct ListAgentsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Delivery agents for the assignment picker
/// GET /admin/delivery-agents
pub async fn list_delivery_agents(
    service: web::Data<Arc<CustomerService>>,
    query: web::Query<ListAgentsQuery>,
) -> Result<HttpResponse, AppError> {
    let agents = service
        .list_delivery_agents(query.limit, query.offset)
        .await?;
    let agents: Vec<CustomerResponse> = agents.into_iter().map(CustomerResponse::from).collect();

    Ok(HttpResponse::Ok().json(agents))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

/// Configure admin account routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route("/delivery-agents", web::get().to(list_delivery_agents));
}
