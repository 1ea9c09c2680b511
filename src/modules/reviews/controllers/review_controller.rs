use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::reviews::models::CreateReviewRequest;
use crate::modules::reviews::services::ReviewService;

#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Reviews for a product
/// GET /products/{id}/reviews
pub async fn list_reviews(
    service: web::Data<Arc<ReviewService>>,
    path: web::Path<String>,
    query: web::Query<ListReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let reviews = service
        .list_for_product(&path.into_inner(), query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(reviews))
}

/// Leave a review on a product
/// POST /products/{id}/reviews
pub async fn create_review(
    service: web::Data<Arc<ReviewService>>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let review = service
        .create(&path.into_inner(), &user.0.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(review))
}

/// Remove a review
/// DELETE /admin/reviews/{id}
pub async fn delete_review(
    service: web::Data<Arc<ReviewService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure public review routes (nested under /products)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products/{id}/reviews")
            .route("", web::get().to(list_reviews))
            .route("", web::post().to(create_review)),
    );
}

/// Configure admin review routes (mounted under /admin)
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route("/reviews/{id}", web::delete().to(delete_review));
}
