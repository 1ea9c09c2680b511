// Coupons module: discount codes and apply-time validation

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Coupon, DiscountType};
pub use repositories::{CouponRepository, MySqlCouponRepository};
pub use services::CouponService;
