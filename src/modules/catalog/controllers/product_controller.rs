use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::catalog::models::{CreateProductRequest, ProductFilter, UpdateProductRequest};
use crate::modules::catalog::services::CatalogService;

/// Query parameters for the storefront product listing
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub gender: Option<crate::modules::catalog::models::Gender>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List products (storefront)
/// GET /products
pub async fn list_products(
    service: web::Data<Arc<CatalogService>>,
    query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    // Archived products are admin-only; the public listing never shows them
    let filter = ProductFilter {
        category_id: query.category_id,
        gender: query.gender,
        include_archived: false,
    };
    let products = service.list_products(filter, query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Get a single product
/// GET /products/{id}
pub async fn get_product(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Create a product
/// POST /admin/products
pub async fn create_product(
    service: web::Data<Arc<CatalogService>>,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service.create_product(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(product))
}

/// Update a product
/// PUT /admin/products/{id}
pub async fn update_product(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .update_product(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Archive a product
/// POST /admin/products/{id}/archive
pub async fn archive_product(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.archive_product(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure public product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("/{id}", web::get().to(get_product)),
    );
}

/// Configure admin product routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}/archive", web::post().to(archive_product)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListProductsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
        assert!(query.category_id.is_none());
        assert!(query.gender.is_none());
    }
}
