use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::domain::catalog::{Carrier, NewCarrier, NewProduct, Product, ReviewView};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CarrierRepository, ProductRepository, ReviewRepository};

// (name, description, price, image url, category)
const DEFAULT_PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    ("Baby Onesie", "Comfortable cotton onesie", "15.99", "/images/onesie.jpg", "bavoirs"),
    ("Bavoir Étoiles", "Waterproof bib with a star print", "9.90", "/images/bib-stars.jpg", "bavoirs"),
    ("Doudou Lapin", "Soft rabbit comforter", "24.50", "/images/rabbit.jpg", "doudous"),
    ("Doudou Ours", "Plush bear comforter", "22.00", "/images/bear.jpg", "doudous"),
    ("Couverture Nuage", "Cloud-pattern cotton blanket", "39.00", "/images/blanket-cloud.jpg", "couvertures"),
    ("Couverture Polaire", "Warm fleece blanket", "34.90", "/images/blanket-fleece.jpg", "couvertures"),
];

const DEFAULT_CARRIERS: &[(&str, i32)] = &[("Colissimo", 3), ("Chronopost", 1), ("Mondial Relay", 5)];

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    carriers: Arc<dyn CarrierRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        carriers: Arc<dyn CarrierRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            products,
            carriers,
            reviews,
        }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.list()
    }

    pub fn get_product(&self, id: i32) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn list_carriers(&self) -> Result<Vec<Carrier>, DomainError> {
        self.carriers.list()
    }

    pub fn list_reviews(&self, product_id: i32) -> Result<Vec<ReviewView>, DomainError> {
        let product = self.get_product(product_id)?;
        self.reviews.list_for_product(product.id)
    }

    /// Inserts the default catalog when there are no products yet.
    /// Returns the number of rows inserted.
    pub fn seed_defaults(&self) -> Result<usize, DomainError> {
        if self.products.count()? > 0 {
            log::info!("Catalog already populated, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for (name, description, price, image_url, category) in DEFAULT_PRODUCTS {
            let price = BigDecimal::from_str(price)
                .map_err(|e| DomainError::Internal(format!("Invalid seed price '{price}': {e}")))?;
            self.products.create(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                image_url: image_url.to_string(),
                category: category.to_string(),
            })?;
            inserted += 1;
        }
        for (name, delay_days) in DEFAULT_CARRIERS {
            self.carriers.create(NewCarrier {
                name: name.to_string(),
                delay_days: *delay_days,
            })?;
            inserted += 1;
        }

        log::info!("Seeded catalog with {} rows", inserted);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::NewReview;
    use crate::domain::ports::UserRepository;
    use crate::domain::user::NewUser;
    use crate::infrastructure::in_memory::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> CatalogService {
        CatalogService::new(store.clone(), store.clone(), store.clone())
    }

    #[test]
    fn seed_populates_an_empty_catalog_once() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = service(&store);

        let inserted = catalog.seed_defaults().unwrap();
        assert_eq!(inserted, DEFAULT_PRODUCTS.len() + DEFAULT_CARRIERS.len());
        assert_eq!(catalog.list_products().unwrap().len(), DEFAULT_PRODUCTS.len());
        assert_eq!(catalog.list_carriers().unwrap().len(), DEFAULT_CARRIERS.len());

        assert_eq!(catalog.seed_defaults().unwrap(), 0);
        assert_eq!(catalog.list_products().unwrap().len(), DEFAULT_PRODUCTS.len());
    }

    #[test]
    fn seeded_prices_keep_their_scale() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = service(&store);
        catalog.seed_defaults().unwrap();

        let onesie = catalog.get_product(1).unwrap();
        assert_eq!(onesie.name, "Baby Onesie");
        assert_eq!(onesie.price.to_string(), "15.99");
    }

    #[test]
    fn missing_product_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store).get_product(7).unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Product")));
    }

    #[test]
    fn reviews_of_missing_product_are_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store).list_reviews(7).unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Product")));
    }

    #[test]
    fn reviews_are_listed_for_their_product() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = service(&store);
        catalog.seed_defaults().unwrap();
        let author = UserRepository::create(
            store.as_ref(),
            NewUser {
                username: "reviewer".to_string(),
                email: String::new(),
                password_hash: "hash".to_string(),
            },
        )
        .unwrap();
        ReviewRepository::create(
            store.as_ref(),
            NewReview {
                product_id: 3,
                author_id: author.id,
                rating: 4,
            },
        )
        .unwrap();

        let reviews = catalog.list_reviews(3).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author, "reviewer");
        assert!(catalog.list_reviews(1).unwrap().is_empty());
    }
}
