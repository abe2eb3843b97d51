use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{Carrier, NewCarrier, NewProduct, NewReview, Product, ReviewView};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CarrierRepository, ProductRepository, ReviewRepository};
use crate::schema::{carriers, products, reviews, users};

use super::models::{
    CarrierRow, NewCarrierRow, NewProductRow, NewReviewRow, ProductRow, ReviewRow,
};

// ── Products ──────────────────────────────────────────────────────────────────

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                name: product.name,
                description: product.description,
                price: product.price,
                image_url: product.image_url,
                category: product.category,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(products::table.count().get_result(&mut conn)?)
    }
}

// ── Carriers ──────────────────────────────────────────────────────────────────

pub struct DieselCarrierRepository {
    pool: DbPool,
}

impl DieselCarrierRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CarrierRepository for DieselCarrierRepository {
    fn create(&self, carrier: NewCarrier) -> Result<Carrier, DomainError> {
        if carrier.delay_days < 0 {
            return Err(DomainError::InvalidInput(
                "delay_days must not be negative".to_string(),
            ));
        }
        let mut conn = self.pool.get()?;

        let row: CarrierRow = diesel::insert_into(carriers::table)
            .values(&NewCarrierRow {
                name: carrier.name,
                delay_days: carrier.delay_days,
            })
            .returning(CarrierRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list(&self) -> Result<Vec<Carrier>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = carriers::table
            .select(CarrierRow::as_select())
            .order(carriers::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Carrier::from).collect())
    }
}

// ── Reviews ───────────────────────────────────────────────────────────────────

pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn review_view(row: ReviewRow, author: String) -> ReviewView {
    ReviewView {
        id: row.id,
        product_id: row.product_id,
        author,
        rating: row.rating,
        created_at: row.created_at,
    }
}

impl ReviewRepository for DieselReviewRepository {
    fn create(&self, review: NewReview) -> Result<ReviewView, DomainError> {
        review.validate()?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let product_exists: bool = diesel::select(diesel::dsl::exists(
                products::table.filter(products::id.eq(review.product_id)),
            ))
            .get_result(conn)?;
            if !product_exists {
                return Err(DomainError::NotFound("Product"));
            }

            let row: ReviewRow = diesel::insert_into(reviews::table)
                .values(&NewReviewRow {
                    product_id: review.product_id,
                    author_id: review.author_id,
                    rating: review.rating,
                })
                .returning(ReviewRow::as_returning())
                .get_result(conn)?;

            let author: String = users::table
                .find(row.author_id)
                .select(users::username)
                .first(conn)?;

            Ok(review_view(row, author))
        })
    }

    fn list_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(ReviewRow, String)> = reviews::table
            .inner_join(users::table)
            .filter(reviews::product_id.eq(product_id))
            .select((ReviewRow::as_select(), users::username))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(row, author)| review_view(row, author))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::ports::UserRepository;
    use crate::domain::user::NewUser;
    use crate::infrastructure::test_db::setup_db;
    use crate::infrastructure::user_repo::DieselUserRepository;

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            image_url: "/test.jpg".to_string(),
            category: "doudous".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires docker for the Postgres testcontainer"]
    async fn create_and_list_products() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let first = repo.create(new_product("Test Product 1", "10.00")).expect("create");
        repo.create(new_product("Test Product 2", "20.00")).expect("create");

        let all = repo.list().expect("list");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].price.to_string(), "10.00");
        assert_eq!(repo.count().expect("count"), 2);
        assert!(repo.find_by_id(first.id + 100).expect("find").is_none());
    }

    #[tokio::test]
    #[ignore = "requires docker for the Postgres testcontainer"]
    async fn carriers_are_listed_in_insertion_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCarrierRepository::new(pool);

        for (name, delay_days) in [("Colissimo", 3), ("Chronopost", 1)] {
            repo.create(NewCarrier {
                name: name.to_string(),
                delay_days,
            })
            .expect("create");
        }

        let names: Vec<String> = repo.list().expect("list").into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Colissimo", "Chronopost"]);
    }

    #[tokio::test]
    #[ignore = "requires docker for the Postgres testcontainer"]
    async fn reviews_carry_author_username() {
        let (_container, pool) = setup_db().await;
        let products = DieselProductRepository::new(pool.clone());
        let users = DieselUserRepository::new(pool.clone());
        let repo = DieselReviewRepository::new(pool);

        let product = products.create(new_product("Doudou", "24.50")).expect("product");
        let author = users
            .create(NewUser {
                username: "reviewer".to_string(),
                email: String::new(),
                password_hash: "hash".to_string(),
            })
            .expect("user");

        repo.create(NewReview {
            product_id: product.id,
            author_id: author.id,
            rating: 5,
        })
        .expect("review");

        let reviews = repo.list_for_product(product.id).expect("list");
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author, "reviewer");
        assert_eq!(reviews[0].rating, 5);

        let err = repo
            .create(NewReview {
                product_id: product.id + 100,
                author_id: author.id,
                rating: 3,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Product")));
    }
}
