//! Token authentication for actix-web handlers.
//!
//! Clients send `Authorization: Token <key>` where `<key>` is the token
//! returned by registration or login.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::domain::user::User;
use crate::errors::AppError;
use crate::state::AppState;

pub const TOKEN_SCHEME: &str = "Token";

/// Extracts the token key from an `Authorization` header value.
pub fn parse_token_header(value: &str) -> Result<&str, AppError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(key), None) if scheme.eq_ignore_ascii_case(TOKEN_SCHEME) => Ok(key),
        (Some(scheme), None, None) if scheme.eq_ignore_ascii_case(TOKEN_SCHEME) => Err(
            AppError::Unauthorized("Invalid token header. No credentials provided.".to_string()),
        ),
        (Some(scheme), Some(_), Some(_)) if scheme.eq_ignore_ascii_case(TOKEN_SCHEME) => {
            Err(AppError::Unauthorized(
                "Invalid token header. Token string should not contain spaces.".to_string(),
            ))
        }
        _ => Err(AppError::Unauthorized(
            "Authentication credentials were not provided.".to_string(),
        )),
    }
}

/// The user behind a valid token. Handlers taking this argument reject
/// anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().map(str::to_owned));

        Box::pin(async move {
            let state = state.ok_or_else(|| AppError::Internal("AppState not configured".into()))?;
            let header = match header {
                Some(Ok(h)) => h,
                Some(Err(_)) => {
                    return Err(AppError::Unauthorized(
                        "Invalid token header. Token string should not contain invalid characters."
                            .to_string(),
                    ))
                }
                None => {
                    return Err(AppError::Unauthorized(
                        "Authentication credentials were not provided.".to_string(),
                    ))
                }
            };
            let key = parse_token_header(&header)?.to_string();

            let user = web::block(move || state.auth.authenticate(&key)).await??;
            Ok(AuthenticatedUser(user))
        })
    }
}
