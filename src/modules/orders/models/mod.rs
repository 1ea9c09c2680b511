mod order;

pub use order::{CheckoutRequest, Order, OrderItem, OrderStatus, UpdateStatusRequest};
