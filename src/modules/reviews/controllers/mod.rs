mod review_controller;

pub use review_controller::{configure, configure_admin};
