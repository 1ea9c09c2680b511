// Cart module: per-customer persistent cart

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CartItem, CartLine};
pub use repositories::{CartRepository, MySqlCartRepository};
pub use services::{CartService, CartView};
