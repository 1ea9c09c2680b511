// Reviews module: product ratings and comments

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Review;
pub use repositories::{MySqlReviewRepository, ReviewRepository};
pub use services::ReviewService;
