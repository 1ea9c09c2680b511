mod coupon_controller;

pub use coupon_controller::{configure, configure_admin};
