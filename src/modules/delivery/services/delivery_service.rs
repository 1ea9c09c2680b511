use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::customers::models::Role;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::delivery::services::otp::generate_otp;
use crate::modules::orders::models::{Order, OrderStatus};
use crate::modules::orders::repositories::OrderRepository;

/// Service for the delivery-agent workflow
///
/// Assignment happens while an order is SHIPPED; starting the delivery moves
/// it to OUT_FOR_DELIVERY and issues the OTP; confirming with the customer's
/// OTP completes the order and writes the agent commission.
pub struct DeliveryService {
    order_repo: Arc<dyn OrderRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    commission_rate: Decimal,
}

impl DeliveryService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        commission_rate: Decimal,
    ) -> Self {
        Self {
            order_repo,
            customer_repo,
            commission_rate,
        }
    }

    /// Assign a delivery agent to a shipped order (admin)
    pub async fn assign_agent(&self, order_id: &str, agent_id: &str) -> Result<Order> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))?;

        if order.status != OrderStatus::Shipped {
            return Err(AppError::validation(format!(
                "Agent can only be assigned to a SHIPPED order, found {}",
                order.status
            )));
        }

        let agent = self
            .customer_repo
            .find_by_id(agent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {}", agent_id)))?;

        if agent.role != Role::DeliveryAgent {
            return Err(AppError::validation(format!(
                "Account '{}' is not a delivery agent",
                agent.email
            )));
        }

        self.order_repo.assign_agent(order_id, agent_id).await?;

        info!(order_id = %order_id, agent_id = %agent_id, "Delivery agent assigned");

        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))
    }

    /// Agent picks up the order: OUT_FOR_DELIVERY plus a fresh OTP
    pub async fn start_delivery(&self, order_id: &str, agent_id: &str) -> Result<Order> {
        let order = self.load_assigned(order_id, agent_id).await?;

        if order.status != OrderStatus::Shipped {
            return Err(AppError::validation(format!(
                "Delivery can only start from SHIPPED, found {}",
                order.status
            )));
        }

        let otp = generate_otp();
        self.order_repo.start_delivery(order_id, &otp).await?;

        info!(order_id = %order_id, agent_id = %agent_id, "Delivery started");

        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))
    }

    /// Agent confirms handover with the customer's OTP
    ///
    /// On a match the order becomes DELIVERED and the commission
    /// (total × commission rate, rounded to cents) is written. A wrong OTP
    /// changes nothing.
    pub async fn confirm_delivery(
        &self,
        order_id: &str,
        agent_id: &str,
        otp: &str,
    ) -> Result<Order> {
        let order = self.load_assigned(order_id, agent_id).await?;

        if order.status != OrderStatus::OutForDelivery {
            return Err(AppError::validation(format!(
                "Delivery can only be confirmed from OUT_FOR_DELIVERY, found {}",
                order.status
            )));
        }

        let expected = order
            .delivery_otp
            .as_deref()
            .ok_or_else(|| AppError::internal("Order has no delivery OTP"))?;

        if expected != otp.trim() {
            warn!(order_id = %order_id, agent_id = %agent_id, "OTP mismatch");
            return Err(AppError::validation("Incorrect confirmation code"));
        }

        let commission = Self::commission_for(order.total, self.commission_rate);
        self.order_repo
            .complete_delivery(order_id, commission)
            .await?;

        info!(
            order_id = %order_id,
            agent_id = %agent_id,
            commission = %commission,
            "Delivery confirmed"
        );

        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))
    }

    /// Orders the agent still has to deliver
    pub async fn active_deliveries(&self, agent_id: &str) -> Result<Vec<Order>> {
        self.order_repo.list_by_agent(agent_id).await
    }

    /// Commission for an order total, rounded to cents
    pub fn commission_for(total: Decimal, rate: Decimal) -> Decimal {
        (total * rate).round_dp(2)
    }

    async fn load_assigned(&self, order_id: &str, agent_id: &str) -> Result<Order> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))?;

        if order.delivery_agent_id.as_deref() != Some(agent_id) {
            return Err(AppError::forbidden("Order is assigned to another agent"));
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_commission_is_rate_times_total() {
        assert_eq!(
            DeliveryService::commission_for(dec!(200), dec!(0.10)),
            dec!(20.00)
        );
    }

    #[test]
    fn test_commission_rounds_to_cents() {
        // 89.99 * 0.10 = 8.999 -> 9.00
        assert_eq!(
            DeliveryService::commission_for(dec!(89.99), dec!(0.10)),
            dec!(9.00)
        );
    }

    #[test]
    fn test_zero_rate_means_zero_commission() {
        assert_eq!(
            DeliveryService::commission_for(dec!(500), dec!(0)),
            dec!(0)
        );
    }
}
