pub mod auth;
pub mod carriers;
pub mod orders;
pub mod products;
