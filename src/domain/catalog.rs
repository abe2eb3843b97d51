use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image_url: String,
    pub category: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image_url: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    pub id: i32,
    pub name: String,
    pub delay_days: i32,
}

#[derive(Debug, Clone)]
pub struct NewCarrier {
    pub name: String,
    pub delay_days: i32,
}

/// A review as shown to clients, with the author resolved to a username.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub id: i32,
    pub product_id: i32,
    pub author: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: i32,
    pub author_id: i32,
    pub rating: i16,
}

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

impl NewReview {
    pub fn validate(&self) -> Result<(), super::errors::DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(super::errors::DomainError::InvalidInput(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn product_displays_as_its_name() {
        let product = Product {
            id: 1,
            name: "Baby Romper".to_string(),
            description: "Soft cotton romper for newborns".to_string(),
            price: BigDecimal::from_str("19.99").expect("valid decimal"),
            image_url: "/images/romper.jpg".to_string(),
            category: String::new(),
        };

        assert_eq!(product.to_string(), "Baby Romper");
    }

    #[test]
    fn product_price_keeps_two_decimal_places() {
        let price = BigDecimal::from_str("29.99").expect("valid decimal");
        assert_eq!(price.to_string(), "29.99");
    }

    #[test]
    fn review_rating_out_of_range_is_rejected() {
        let review = NewReview {
            product_id: 1,
            author_id: 1,
            rating: 6,
        };
        assert!(review.validate().is_err());

        let review = NewReview { rating: 0, ..review };
        assert!(review.validate().is_err());
    }

    #[test]
    fn review_rating_bounds_are_inclusive() {
        for rating in [MIN_RATING, MAX_RATING] {
            let review = NewReview {
                product_id: 1,
                author_id: 1,
                rating,
            };
            assert!(review.validate().is_ok());
        }
    }
}
