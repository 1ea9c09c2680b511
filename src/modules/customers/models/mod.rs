mod customer;

pub use customer::{Customer, CustomerResponse, LoginRequest, RegisterRequest, Role};
