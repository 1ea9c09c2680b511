// Orders module: checkout and the fulfilment lifecycle

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Order, OrderItem, OrderStatus};
pub use repositories::{MySqlOrderRepository, OrderRepository};
pub use services::OrderService;
