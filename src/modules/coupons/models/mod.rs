mod coupon;

pub use coupon::{Coupon, CreateCouponRequest, DiscountType};
