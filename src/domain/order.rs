use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::errors::DomainError;

/// Terminal state of an order, fixed when the order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Paid,
    Declined,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(OrderStatus::Paid),
            "declined" => Ok(OrderStatus::Declined),
            other => Err(DomainError::Internal(format!("unknown order status '{other}'"))),
        }
    }
}

/// Input of the order-creation flow, as received from the caller.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub product_id: i32,
    pub card_number: String,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub product_id: i32,
    pub card_last_four: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub card_last_four: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(OrderStatus::Paid.to_string(), "paid");
        assert_eq!(OrderStatus::Declined.to_string(), "declined");
    }

    #[test]
    fn status_parses_stored_values() {
        assert_eq!("paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!(
            "declined".parse::<OrderStatus>().unwrap(),
            OrderStatus::Declined
        );
    }

    #[test]
    fn unknown_status_is_an_internal_error() {
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
