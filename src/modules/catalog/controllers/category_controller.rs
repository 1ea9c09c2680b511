use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::catalog::models::CreateCategoryRequest;
use crate::modules::catalog::services::CatalogService;

/// List categories
/// GET /categories
pub async fn list_categories(
    service: web::Data<Arc<CatalogService>>,
) -> Result<HttpResponse, AppError> {
    let categories = service.list_categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Create a category
/// POST /admin/categories
pub async fn create_category(
    service: web::Data<Arc<CatalogService>>,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service.create_category(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(category))
}

/// Configure public category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/categories", web::get().to(list_categories));
}

/// Configure admin category routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route("/categories", web::post().to(create_category));
}
