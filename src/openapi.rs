use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::list_reviews,
        handlers::carriers::list_carriers,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
    ),
    components(schemas(
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::AuthResponse,
        handlers::products::ProductResponse,
        handlers::products::ReviewResponse,
        handlers::carriers::CarrierResponse,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderResponse,
    )),
    modifiers(&TokenSecurity),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "products", description = "Catalog"),
        (name = "carriers", description = "Shipping carriers"),
        (name = "orders", description = "Checkout with the mock payment gateway"),
    )
)]
pub struct ApiDoc;

struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register/",
            "/api/auth/login/",
            "/api/products/",
            "/api/products/{id}/",
            "/api/products/{id}/reviews/",
            "/api/carriers/",
            "/api/orders/",
            "/api/orders/{id}/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn declares_token_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("token"));
    }
}
