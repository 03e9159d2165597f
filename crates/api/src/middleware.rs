//! Bearer-token authentication for protected handlers.
//!
//! [`CurrentUser`] is an extractor rather than a router-level layer because
//! the listing endpoint shares its path with the buyer-only submit endpoint;
//! only handlers that declare the extractor require authentication.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::Response,
};
use chrono::Utc;

use emporium_auth::JwtValidator;
use emporium_store::ReviewStore;

use crate::app::errors;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub store: Arc<dyn ReviewStore>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthState>()
            .cloned()
            .ok_or_else(|| {
                errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "misconfigured",
                    "auth state missing",
                )
            })?;

        let token = extract_bearer(&parts.headers)
            .ok_or_else(|| unauthorized("missing or malformed bearer token"))?;

        let claims = auth
            .jwt
            .validate(token, Utc::now())
            .map_err(|_e| unauthorized("invalid token"))?;

        // Identity comes from the token; the role comes from the user record,
        // so revoking or demoting a user takes effect immediately.
        let user = auth
            .store
            .get_user(claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed during authentication");
                errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "internal storage failure",
                )
            })?
            .filter(|u| u.is_active)
            .ok_or_else(|| unauthorized("unknown or inactive user"))?;

        Ok(CurrentUser {
            id: user.id,
            role: user.role,
        })
    }
}

fn unauthorized(message: &str) -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
