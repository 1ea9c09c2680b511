// Delivery module: agent assignment, OTP handover, commission

pub mod controllers;
pub mod services;

pub use services::DeliveryService;
