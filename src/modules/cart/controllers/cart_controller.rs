use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::cart::models::{AddCartItemRequest, UpdateCartItemRequest};
use crate::modules::cart::services::CartService;

/// View the cart
/// GET /cart
pub async fn view_cart(
    service: web::Data<Arc<CartService>>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let cart = service.view(&user.0.id).await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// Add a product to the cart
/// POST /cart/items
pub async fn add_item(
    service: web::Data<Arc<CartService>>,
    user: CurrentUser,
    request: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let cart = service
        .add_item(&user.0.id, &request.product_id, request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// Set the quantity of a cart row
/// PUT /cart/items/{product_id}
pub async fn update_item(
    service: web::Data<Arc<CartService>>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let cart = service
        .set_quantity(&user.0.id, &path.into_inner(), request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// Remove a product from the cart
/// DELETE /cart/items/{product_id}
pub async fn remove_item(
    service: web::Data<Arc<CartService>>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = service.remove_item(&user.0.id, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// Empty the cart
/// DELETE /cart
pub async fn clear_cart(
    service: web::Data<Arc<CartService>>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    service.clear(&user.0.id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure cart routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(view_cart))
            .route("", web::delete().to(clear_cart))
            .route("/items", web::post().to(add_item))
            .route("/items/{product_id}", web::put().to(update_item))
            .route("/items/{product_id}", web::delete().to(remove_item)),
    );
}
