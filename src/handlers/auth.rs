use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{AuthSession, Credentials, Registration};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "newbuyer")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "buyer@example.com")]
    pub email: String,
    #[schema(example = "securepass123")]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "newbuyer")]
    pub username: String,
    #[schema(example = "securepass123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Send as `Authorization: Token <token>` on authenticated endpoints.
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        AuthResponse {
            token: session.token,
            user_id: session.user.id,
            username: session.user.username,
            email: session.user.email,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/auth/register/
///
/// Creates the account and returns its token.
#[utoipa::path(
    post,
    path = "/api/auth/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input or username taken"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let registration = Registration {
        username: body.username,
        email: body.email,
        password: body.password,
    };

    let session = web::block(move || state.auth.register(registration)).await??;

    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// POST /api/auth/login/
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let credentials = Credentials {
        username: body.username,
        password: body.password,
    };

    let session = web::block(move || state.auth.login(credentials)).await??;

    Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}
