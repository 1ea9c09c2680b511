mod delivery_service;
pub mod otp;

pub use delivery_service::DeliveryService;
