use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::cart::models::CartLine;
use crate::modules::cart::repositories::CartRepository;
use crate::modules::coupons::services::CouponService;
use crate::modules::orders::models::{CheckoutRequest, Order, OrderItem, OrderStatus};
use crate::modules::orders::repositories::OrderRepository;

/// Service for checkout and the order lifecycle
pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
    cart_repo: Arc<dyn CartRepository>,
    coupon_service: Arc<CouponService>,
}

impl OrderService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        cart_repo: Arc<dyn CartRepository>,
        coupon_service: Arc<CouponService>,
    ) -> Self {
        Self {
            order_repo,
            cart_repo,
            coupon_service,
        }
    }

    /// Turn the customer's cart into an order
    ///
    /// Snapshots name and price per line, applies the optional coupon to the
    /// subtotal, and hands the whole write (order, items, stock, cart) to the
    /// repository as one transaction.
    pub async fn checkout(&self, customer_id: &str, request: CheckoutRequest) -> Result<Order> {
        let lines = self.cart_repo.list_with_products(customer_id).await?;

        if lines.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        for line in &lines {
            if line.archived {
                return Err(AppError::validation(format!(
                    "Product '{}' is no longer available",
                    line.product_name
                )));
            }
            if line.quantity > line.stock {
                return Err(AppError::validation(format!(
                    "Only {} units of '{}' in stock",
                    line.stock, line.product_name
                )));
            }
        }

        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();

        let (coupon_code, discount) = match &request.coupon_code {
            Some(code) => {
                let (coupon, discount) = self.coupon_service.apply(code, subtotal).await?;
                (Some(coupon.code), discount)
            }
            None => (None, Decimal::ZERO),
        };

        let items = lines
            .into_iter()
            .map(|line| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: String::new(),
                product_id: line.product_id,
                product_name: line.product_name,
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        let order = Order::new(
            customer_id.to_string(),
            request.shipping_address,
            items,
            discount,
            coupon_code,
        )?;

        let created = self.order_repo.create_checkout(&order).await?;

        info!(
            order_id = %created.id,
            customer_id = %customer_id,
            total = %created.total,
            "Checkout completed"
        );

        Ok(created)
    }

    /// Fetch an order, enforcing ownership unless the caller is an admin
    pub async fn get_order(
        &self,
        id: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> Result<Order> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

        if !requester_is_admin && order.customer_id != requester_id {
            return Err(AppError::forbidden("Order belongs to another customer"));
        }

        Ok(order)
    }

    pub async fn list_my_orders(
        &self,
        customer_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        self.order_repo
            .list_by_customer(customer_id, limit, offset)
            .await
    }

    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        self.order_repo.list_all(status, limit, offset).await
    }

    /// Advance an order's status (admin), enforcing the transition table
    ///
    /// OUT_FOR_DELIVERY and DELIVERED are reserved for the delivery workflow,
    /// which issues and checks the confirmation OTP.
    pub async fn advance_status(&self, id: &str, new_status: OrderStatus) -> Result<Order> {
        if matches!(
            new_status,
            OrderStatus::OutForDelivery | OrderStatus::Delivered
        ) {
            return Err(AppError::validation(format!(
                "Status {} is set by the delivery workflow",
                new_status
            )));
        }

        let mut order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

        order.update_status(new_status)?;

        if new_status == OrderStatus::Cancelled {
            self.order_repo.cancel_and_restock(&order).await?;
        } else {
            self.order_repo.update_status(id, new_status).await?;
        }

        info!(order_id = %id, status = %new_status, "Order status changed");

        Ok(order)
    }

    /// Cancel an order
    ///
    /// Owners may cancel while PENDING; admins also while PROCESSING.
    /// Cancelling restocks every item in the same transaction.
    pub async fn cancel(
        &self,
        id: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> Result<Order> {
        let mut order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

        if !requester_is_admin {
            if order.customer_id != requester_id {
                return Err(AppError::forbidden("Order belongs to another customer"));
            }
            if order.status != OrderStatus::Pending {
                return Err(AppError::validation(
                    "Order can no longer be cancelled; contact support",
                ));
            }
        }

        order.update_status(OrderStatus::Cancelled)?;
        self.order_repo.cancel_and_restock(&order).await?;

        info!(order_id = %id, "Order cancelled");

        Ok(order)
    }
}
