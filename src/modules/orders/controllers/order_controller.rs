use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::customers::models::Role;
use crate::modules::orders::models::{CheckoutRequest, OrderStatus, UpdateStatusRequest};
use crate::modules::orders::services::OrderService;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Place an order from the current cart
/// POST /orders/checkout
pub async fn checkout(
    service: web::Data<Arc<OrderService>>,
    user: CurrentUser,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service.checkout(&user.0.id, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(order))
}

/// List the caller's orders
/// GET /orders
pub async fn list_my_orders(
    service: web::Data<Arc<OrderService>>,
    user: CurrentUser,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = service
        .list_my_orders(&user.0.id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Get one order (owner or admin)
/// GET /orders/{id}
pub async fn get_order(
    service: web::Data<Arc<OrderService>>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .get_order(&path.into_inner(), &user.0.id, user.0.role == Role::Admin)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Cancel an order (owner while pending, admin also while processing)
/// POST /orders/{id}/cancel
pub async fn cancel_order(
    service: web::Data<Arc<OrderService>>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .cancel(&path.into_inner(), &user.0.id, user.0.role == Role::Admin)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// List all orders
/// GET /admin/orders
pub async fn list_all_orders(
    service: web::Data<Arc<OrderService>>,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = service
        .list_all(query.status, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Advance an order's status
/// POST /admin/orders/{id}/status
pub async fn update_status(
    service: web::Data<Arc<OrderService>>,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .advance_status(&path.into_inner(), request.status)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Configure customer order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("/checkout", web::post().to(checkout))
            .route("", web::get().to(list_my_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/cancel", web::post().to(cancel_order)),
    );
}

/// Configure admin order routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_all_orders))
            .route("/{id}/status", web::post().to(update_status)),
    );
}
