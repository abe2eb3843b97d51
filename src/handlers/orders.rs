use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;
use crate::domain::order::{OrderView, PlaceOrder};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_id: i32,
    /// 16 digits. Only the last four are stored.
    #[schema(example = "4111111111111111")]
    pub card_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    /// `paid` for every stored order
    pub status: String,
    pub card_last_four: String,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            product_id: o.product_id,
            product_name: o.product_name,
            status: o.status.to_string(),
            card_last_four: o.card_last_four,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders/
///
/// Charges the card through the payment gateway and records a paid order.
/// Declined payments are not recorded.
#[utoipa::path(
    post,
    path = "/api/orders/",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order paid", body = OrderResponse),
        (status = 400, description = "card_number is not 16 digits"),
        (status = 401, description = "Missing or invalid token"),
        (status = 402, description = "Payment declined"),
        (status = 404, description = "Product not found"),
    ),
    security(("token" = [])),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let user_id = user.0.id;
    let input = PlaceOrder {
        product_id: body.product_id,
        card_number: body.card_number,
    };

    let order = web::block(move || state.orders.place_order(user_id, input)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/orders/
///
/// Orders of the calling user, newest first.
#[utoipa::path(
    get,
    path = "/api/orders/",
    responses(
        (status = 200, description = "Caller's orders", body = [OrderResponse]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = user.0.id;

    let orders = web::block(move || state.orders.list_orders(user_id)).await??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/orders/{id}/
#[utoipa::path(
    get,
    path = "/api/orders/{id}/",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such order for this user"),
    ),
    security(("token" = [])),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.0.id;
    let order_id = path.into_inner();

    let order = web::block(move || state.orders.get_order(user_id, order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
