mod delivery_controller;

pub use delivery_controller::{configure, configure_admin};
