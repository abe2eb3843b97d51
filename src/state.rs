use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::db::DbPool;
use crate::domain::payment::MockPaymentGateway;
use crate::domain::ports::{
    CarrierRepository, OrderRepository, PaymentGateway, ProductRepository, ReviewRepository,
    UserRepository,
};
use crate::infrastructure::catalog_repo::{
    DieselCarrierRepository, DieselProductRepository, DieselReviewRepository,
};
use crate::infrastructure::in_memory::InMemoryStore;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::user_repo::DieselUserRepository;

/// One handle per repository port.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub carriers: Arc<dyn CarrierRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn diesel(pool: DbPool) -> Self {
        Self {
            products: Arc::new(DieselProductRepository::new(pool.clone())),
            carriers: Arc::new(DieselCarrierRepository::new(pool.clone())),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
            orders: Arc::new(DieselOrderRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            products: store.clone(),
            carriers: store.clone(),
            reviews: store.clone(),
            orders: store.clone(),
            users: store,
        }
    }
}

/// Services shared by every worker, registered as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self::with_gateway(repos, Arc::new(MockPaymentGateway))
    }

    pub fn with_gateway(repos: Repositories, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.users)),
            catalog: Arc::new(CatalogService::new(
                repos.products.clone(),
                repos.carriers,
                repos.reviews,
            )),
            orders: Arc::new(OrderService::new(repos.products, repos.orders, gateway)),
        }
    }
}
