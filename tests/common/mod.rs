#![allow(dead_code)]

use std::str::FromStr;

use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;
use bigdecimal::BigDecimal;
use serde_json::json;
use shop_service::domain::catalog::{NewProduct, Product};
use shop_service::domain::ports::ProductRepository;
use shop_service::infrastructure::in_memory::InMemoryStore;

pub fn add_product(store: &InMemoryStore, name: &str, price: &str, image_url: &str) -> Product {
    ProductRepository::create(
        store,
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            image_url: image_url.to_string(),
            category: String::new(),
        },
    )
    .expect("product should be created")
}

pub fn register_request(username: &str) -> TestRequest {
    TestRequest::post().uri("/api/auth/register/").set_json(json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": format!("{username}-pass123"),
    }))
}

pub fn order_request(token: &str, product_id: i32, card_number: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/orders/")
        .insert_header((AUTHORIZATION, format!("Token {token}")))
        .set_json(json!({
            "product_id": product_id,
            "card_number": card_number,
        }))
}

pub fn authed_get(token: &str, uri: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Token {token}")))
}
