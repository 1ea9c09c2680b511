// Customers module: accounts, roles and sessions

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Customer, Role};
pub use repositories::{CustomerRepository, MySqlCustomerRepository};
pub use services::CustomerService;
