mod order_controller;

pub use order_controller::{configure, configure_admin};
