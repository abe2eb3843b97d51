use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderStatus, OrderView, PlaceOrder};
use crate::domain::payment::{CardNumber, PaymentDecision};
use crate::domain::ports::{OrderRepository, PaymentGateway, ProductRepository};

pub struct OrderService {
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl OrderService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            products,
            orders,
            gateway,
        }
    }

    /// Validates the card, resolves the product and charges it through the
    /// payment gateway. Only an approved payment produces an order.
    pub fn place_order(&self, user_id: i32, input: PlaceOrder) -> Result<OrderView, DomainError> {
        let card = CardNumber::parse(&input.card_number)?;

        let product = self
            .products
            .find_by_id(input.product_id)?
            .ok_or(DomainError::NotFound("Product"))?;

        match self.gateway.authorize(&card) {
            PaymentDecision::Approved => {
                let order = self.orders.create(NewOrder {
                    user_id,
                    product_id: product.id,
                    card_last_four: card.last_four().to_string(),
                    status: OrderStatus::Paid,
                })?;
                log::info!(
                    "Order {} paid by user {} for product {} ({})",
                    order.id,
                    user_id,
                    product.id,
                    product.price
                );
                Ok(order)
            }
            PaymentDecision::Declined { reason } => {
                log::warn!(
                    "Payment declined for user {} on product {} with card ending {}: {}",
                    user_id,
                    product.id,
                    card.last_four(),
                    reason
                );
                Err(DomainError::PaymentDeclined(reason))
            }
        }
    }

    pub fn list_orders(&self, user_id: i32) -> Result<Vec<OrderView>, DomainError> {
        self.orders.list_for_user(user_id)
    }

    pub fn get_order(&self, user_id: i32, id: i32) -> Result<OrderView, DomainError> {
        self.orders
            .find_for_user(user_id, id)?
            .ok_or(DomainError::NotFound("Order"))
    }
}
