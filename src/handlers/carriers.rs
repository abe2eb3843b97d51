use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::catalog::Carrier;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CarrierResponse {
    pub id: i32,
    pub name: String,
    /// Delivery delay in business days
    pub delay_days: i32,
}

impl From<Carrier> for CarrierResponse {
    fn from(c: Carrier) -> Self {
        CarrierResponse {
            id: c.id,
            name: c.name,
            delay_days: c.delay_days,
        }
    }
}

/// GET /api/carriers/
#[utoipa::path(
    get,
    path = "/api/carriers/",
    responses(
        (status = 200, description = "Available carriers", body = [CarrierResponse]),
    ),
    tag = "carriers"
)]
pub async fn list_carriers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let carriers = web::block(move || state.catalog.list_carriers()).await??;

    let body: Vec<CarrierResponse> = carriers.into_iter().map(CarrierResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
