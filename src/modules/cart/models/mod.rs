mod cart_item;

pub use cart_item::{AddCartItemRequest, CartItem, CartLine, UpdateCartItemRequest};
