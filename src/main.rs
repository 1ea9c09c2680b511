use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elara::config::Config;
use elara::middleware::{RateLimiter, RequestId, SessionAuth};
use elara::modules::analytics::{
    controllers as analytics_controllers, AnalyticsService, MySqlAnalyticsRepository,
};
use elara::modules::cart::{controllers as cart_controllers, CartService, MySqlCartRepository};
use elara::modules::catalog::{
    controllers::category_controller, controllers::product_controller, CatalogService,
    MySqlCategoryRepository, MySqlProductRepository,
};
use elara::modules::coupons::{
    controllers as coupon_controllers, CouponService, MySqlCouponRepository,
};
use elara::modules::customers::{
    controllers as customer_controllers, CustomerService, MySqlCustomerRepository, Role,
};
use elara::modules::delivery::{controllers as delivery_controllers, DeliveryService};
use elara::modules::orders::{
    controllers as order_controllers, MySqlOrderRepository, OrderService,
};
use elara::modules::reviews::{
    controllers as review_controllers, MySqlReviewRepository, ReviewService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elara=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting ELARA commerce backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let session_key = Key::derive_from(config.security.session_secret.as_bytes());
    let rate_limit_per_minute = config.security.rate_limit_per_minute;

    // Repositories
    let customer_repo = Arc::new(MySqlCustomerRepository::new(db_pool.clone()));
    let product_repo = Arc::new(MySqlProductRepository::new(db_pool.clone()));
    let category_repo = Arc::new(MySqlCategoryRepository::new(db_pool.clone()));
    let cart_repo = Arc::new(MySqlCartRepository::new(db_pool.clone()));
    let coupon_repo = Arc::new(MySqlCouponRepository::new(db_pool.clone()));
    let order_repo = Arc::new(MySqlOrderRepository::new(db_pool.clone()));
    let review_repo = Arc::new(MySqlReviewRepository::new(db_pool.clone()));
    let analytics_repo = Arc::new(MySqlAnalyticsRepository::new(db_pool.clone()));

    // Services
    let customer_service = Arc::new(CustomerService::new(customer_repo.clone()));
    let catalog_service = Arc::new(CatalogService::new(
        product_repo.clone(),
        category_repo.clone(),
    ));
    let cart_service = Arc::new(CartService::new(cart_repo.clone(), product_repo.clone()));
    let coupon_service = Arc::new(CouponService::new(coupon_repo.clone()));
    let order_service = Arc::new(OrderService::new(
        order_repo.clone(),
        cart_repo.clone(),
        coupon_service.clone(),
    ));
    let delivery_service = Arc::new(DeliveryService::new(
        order_repo.clone(),
        customer_repo.clone(),
        config.app.commission_rate,
    ));
    let review_service = Arc::new(ReviewService::new(
        review_repo.clone(),
        product_repo.clone(),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(analytics_repo.clone()));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(coupon_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(delivery_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(analytics_service.clone()))
            .wrap(SessionMiddleware::builder(
                CookieSessionStore::default(),
                session_key.clone(),
            )
            .cookie_name("elara_session".to_string())
            .build())
            .wrap(Cors::permissive())
            .wrap(RateLimiter::new(rate_limit_per_minute))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
            // Reviews nest under /products/{id}, so they register before the
            // catalog's /products scope
            .configure(review_controllers::configure)
            .configure(product_controller::configure)
            .configure(category_controller::configure)
            .configure(customer_controllers::configure)
            .configure(cart_controllers::configure)
            .configure(order_controllers::configure)
            .configure(coupon_controllers::configure)
            .service(
                web::scope("/admin")
                    .wrap(SessionAuth::with_role(db_pool.clone(), Role::Admin))
                    // assign-agent is a full path under /orders, so it
                    // registers before the orders scope
                    .configure(delivery_controllers::configure_admin)
                    .configure(order_controllers::configure_admin)
                    .configure(product_controller::configure_admin)
                    .configure(category_controller::configure_admin)
                    .configure(coupon_controllers::configure_admin)
                    .configure(review_controllers::configure_admin)
                    .configure(customer_controllers::configure_admin)
                    .configure(analytics_controllers::configure_admin),
            )
            .service(
                web::scope("/delivery")
                    .wrap(SessionAuth::with_role(db_pool.clone(), Role::DeliveryAgent))
                    .configure(delivery_controllers::configure),
            )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "elara"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "ELARA Commerce Backend",
        "version": "0.1.0",
        "status": "running"
    }))
}
