//! Authentication middleware for JWT token validation
//!
//! The token is taken from the `Authorization: Bearer <token>` header when
//! present, otherwise from the `token` cookie. The verified user is stored in
//! the request extensions and handed to handlers through [`CurrentUser`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::{error::ApiError, models::User, state::AppState};

/// Name of the cookie checked when no bearer header is sent
pub const TOKEN_COOKIE: &str = "token";

/// The authenticated caller, available to handlers as an extractor
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Locate the request's token, header first, cookie second
pub fn locate_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = locate_token(req.headers()).ok_or_else(|| {
        debug!("Request without credentials to {}", req.uri().path());
        ApiError::not_authorized()
    })?;

    let claims = state.jwt_service.validate_token(&token).map_err(|e| {
        warn!("Failed to validate token: {}", e);
        ApiError::not_authorized()
    })?;

    let user = state
        .users
        .find_by_id(claims.id)
        .await?
        .ok_or_else(|| {
            warn!("Token names unknown user {}", claims.id);
            ApiError::invalid_token()
        })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            ApiError::Internal("Authenticated user missing from request context".to_string())
        })
    }
}
