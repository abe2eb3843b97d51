use super::catalog::{Carrier, NewCarrier, NewProduct, NewReview, Product, ReviewView};
use super::errors::DomainError;
use super::order::{NewOrder, OrderView};
use super::payment::{CardNumber, PaymentDecision};
use super::user::{NewUser, User};

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn count(&self) -> Result<i64, DomainError>;
}

pub trait CarrierRepository: Send + Sync + 'static {
    fn create(&self, carrier: NewCarrier) -> Result<Carrier, DomainError>;
    fn list(&self) -> Result<Vec<Carrier>, DomainError>;
}

pub trait ReviewRepository: Send + Sync + 'static {
    fn create(&self, review: NewReview) -> Result<ReviewView, DomainError>;
    /// Newest first.
    fn list_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError>;
    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<OrderView>, DomainError>;
    /// Newest first.
    fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderView>, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    /// Fails with [`DomainError::Conflict`] when the username is taken.
    fn create(&self, user: NewUser) -> Result<User, DomainError>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// Returns the user's token, storing `candidate` first if they have none.
    fn get_or_create_token(&self, user_id: i32, candidate: &str) -> Result<String, DomainError>;
    fn find_by_token(&self, key: &str) -> Result<Option<User>, DomainError>;
}

pub trait PaymentGateway: Send + Sync + 'static {
    fn authorize(&self, card: &CardNumber) -> PaymentDecision;
}
