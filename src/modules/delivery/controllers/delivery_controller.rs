use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::delivery::services::DeliveryService;

/// Admin payload for assigning an agent
#[derive(Debug, Deserialize)]
pub struct AssignAgentRequest {
    pub agent_id: String,
}

/// Agent payload for confirming a handover
#[derive(Debug, Deserialize)]
pub struct ConfirmDeliveryRequest {
    pub otp: String,
}

/// Assign a delivery agent to an order
/// POST /admin/orders/{id}/assign-agent
pub async fn assign_agent(
    service: web::Data<Arc<DeliveryService>>,
    path: web::Path<String>,
    request: web::Json<AssignAgentRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .assign_agent(&path.into_inner(), &request.agent_id)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// The agent's undelivered orders
/// GET /delivery/orders
pub async fn active_deliveries(
    service: web::Data<Arc<DeliveryService>>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let orders = service.active_deliveries(&user.0.id).await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Start a delivery, issuing the OTP
/// POST /delivery/orders/{id}/start
pub async fn start_delivery(
    service: web::Data<Arc<DeliveryService>>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .start_delivery(&path.into_inner(), &user.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Confirm a delivery with the customer's OTP
/// POST /delivery/orders/{id}/confirm
pub async fn confirm_delivery(
    service: web::Data<Arc<DeliveryService>>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<ConfirmDeliveryRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .confirm_delivery(&path.into_inner(), &user.0.id, &request.otp)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Configure agent-facing delivery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(active_deliveries))
            .route("/{id}/start", web::post().to(start_delivery))
            .route("/{id}/confirm", web::post().to(confirm_delivery)),
    );
}

/// Configure admin delivery routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/orders/{id}/assign-agent",
        web::post().to(assign_agent),
    );
}
