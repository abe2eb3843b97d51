use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::domain::catalog::{Carrier, NewCarrier, NewProduct, NewReview, Product, ReviewView};
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::ports::{
    CarrierRepository, OrderRepository, ProductRepository, ReviewRepository, UserRepository,
};
use crate::domain::user::{NewUser, User};

#[derive(Debug, Clone)]
struct StoredOrder {
    id: i32,
    user_id: i32,
    product_id: i32,
    card_last_four: String,
    status: crate::domain::order::OrderStatus,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredReview {
    id: i32,
    product_id: i32,
    author_id: i32,
    rating: i16,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    carriers: BTreeMap<i32, Carrier>,
    reviews: BTreeMap<i32, StoredReview>,
    orders: BTreeMap<i32, StoredOrder>,
    users: BTreeMap<i32, User>,
    // token key -> user id
    tokens: BTreeMap<String, i32>,
}

fn next_id<V>(table: &BTreeMap<i32, V>) -> i32 {
    table.keys().next_back().map_or(1, |id| id + 1)
}

impl Tables {
    fn order_view(&self, order: &StoredOrder) -> Result<OrderView, DomainError> {
        let product = self
            .products
            .get(&order.product_id)
            .ok_or(DomainError::NotFound("Product"))?;
        Ok(OrderView {
            id: order.id,
            user_id: order.user_id,
            product_id: order.product_id,
            product_name: product.name.clone(),
            card_last_four: order.card_last_four.clone(),
            status: order.status,
            created_at: order.created_at,
        })
    }

    fn review_view(&self, review: &StoredReview) -> Result<ReviewView, DomainError> {
        let author = self
            .users
            .get(&review.author_id)
            .ok_or(DomainError::NotFound("User"))?;
        Ok(ReviewView {
            id: review.id,
            product_id: review.product_id,
            author: author.username.clone(),
            rating: review.rating,
            created_at: review.created_at,
        })
    }
}

/// A thread-safe in-memory implementation of every repository port.
///
/// Mirrors the relational constraints of the Postgres schema (foreign keys,
/// unique usernames, one token per user) so the services behave the same on
/// either backend. Clones share the same tables.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryStore {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut tables = self.tables.write()?;
        let id = next_id(&tables.products);
        let product = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.tables.read()?.products.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.tables.read()?.products.values().cloned().collect())
    }

    fn count(&self) -> Result<i64, DomainError> {
        Ok(self.tables.read()?.products.len() as i64)
    }
}

impl CarrierRepository for InMemoryStore {
    fn create(&self, carrier: NewCarrier) -> Result<Carrier, DomainError> {
        if carrier.delay_days < 0 {
            return Err(DomainError::InvalidInput(
                "delay_days must not be negative".to_string(),
            ));
        }
        let mut tables = self.tables.write()?;
        let id = next_id(&tables.carriers);
        let carrier = Carrier {
            id,
            name: carrier.name,
            delay_days: carrier.delay_days,
        };
        tables.carriers.insert(id, carrier.clone());
        Ok(carrier)
    }

    fn list(&self) -> Result<Vec<Carrier>, DomainError> {
        Ok(self.tables.read()?.carriers.values().cloned().collect())
    }
}

impl ReviewRepository for InMemoryStore {
    fn create(&self, review: NewReview) -> Result<ReviewView, DomainError> {
        review.validate()?;
        let mut tables = self.tables.write()?;
        if !tables.products.contains_key(&review.product_id) {
            return Err(DomainError::NotFound("Product"));
        }
        let id = next_id(&tables.reviews);
        let stored = StoredReview {
            id,
            product_id: review.product_id,
            author_id: review.author_id,
            rating: review.rating,
            created_at: Utc::now(),
        };
        let view = tables.review_view(&stored)?;
        tables.reviews.insert(id, stored);
        Ok(view)
    }

    fn list_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, DomainError> {
        let tables = self.tables.read()?;
        tables
            .reviews
            .values()
            .rev()
            .filter(|r| r.product_id == product_id)
            .map(|r| tables.review_view(r))
            .collect()
    }
}

impl OrderRepository for InMemoryStore {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let mut tables = self.tables.write()?;
        if !tables.users.contains_key(&order.user_id) {
            return Err(DomainError::NotFound("User"));
        }
        let id = next_id(&tables.orders);
        let stored = StoredOrder {
            id,
            user_id: order.user_id,
            product_id: order.product_id,
            card_last_four: order.card_last_four,
            status: order.status,
            created_at: Utc::now(),
        };
        let view = tables.order_view(&stored)?;
        tables.orders.insert(id, stored);
        Ok(view)
    }

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<OrderView>, DomainError> {
        let tables = self.tables.read()?;
        tables
            .orders
            .get(&id)
            .filter(|o| o.user_id == user_id)
            .map(|o| tables.order_view(o))
            .transpose()
    }

    fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderView>, DomainError> {
        let tables = self.tables.read()?;
        // Ids grow monotonically, so reverse id order is newest first.
        tables
            .orders
            .values()
            .rev()
            .filter(|o| o.user_id == user_id)
            .map(|o| tables.order_view(o))
            .collect()
    }
}

impl UserRepository for InMemoryStore {
    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write()?;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        let id = next_id(&tables.users);
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            date_joined: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read()?;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn get_or_create_token(&self, user_id: i32, candidate: &str) -> Result<String, DomainError> {
        let mut tables = self.tables.write()?;
        if !tables.users.contains_key(&user_id) {
            return Err(DomainError::NotFound("User"));
        }
        if let Some((key, _)) = tables.tokens.iter().find(|(_, uid)| **uid == user_id) {
            return Ok(key.clone());
        }
        tables.tokens.insert(candidate.to_string(), user_id);
        Ok(candidate.to_string())
    }

    fn find_by_token(&self, key: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read()?;
        Ok(tables
            .tokens
            .get(key)
            .and_then(|uid| tables.users.get(uid))
            .cloned())
    }
}
