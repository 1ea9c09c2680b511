mod review;

pub use review::{CreateReviewRequest, Review};
