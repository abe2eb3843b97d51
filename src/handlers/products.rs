use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::catalog::{Product, ReviewView};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Decimal price as a string, e.g. "15.99"
    pub price: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub category: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            image_url: p.image_url,
            category: p.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub product_id: i32,
    /// Username of the reviewer
    pub author: String,
    pub rating: i16,
    pub created_at: String,
}

impl From<ReviewView> for ReviewResponse {
    fn from(r: ReviewView) -> Self {
        ReviewResponse {
            id: r.id,
            product_id: r.product_id,
            author: r.author,
            rating: r.rating,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/products/
#[utoipa::path(
    get,
    path = "/api/products/",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.catalog.list_products()).await??;

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products/{id}/
#[utoipa::path(
    get,
    path = "/api/products/{id}/",
    params(
        ("id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || state.catalog.get_product(id)).await??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// GET /api/products/{id}/reviews/
///
/// Reviews of one product, newest first.
#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews/",
    params(
        ("id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Reviews of the product", body = [ReviewResponse]),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn list_reviews(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();

    let reviews = web::block(move || state.catalog.list_reviews(product_id)).await??;

    let body: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
