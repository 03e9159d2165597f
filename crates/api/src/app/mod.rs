//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: the review service (guarded reads/writes + rating recompute)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use emporium_auth::{Hs256JwtValidator, JwtValidator};
use emporium_store::ReviewStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests, which pass their own store).
pub fn build_app(jwt_secret: String, store: Arc<dyn ReviewStore>) -> Router {
    let jwt: Arc<dyn JwtValidator> = Arc::new(Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let service = Arc::new(services::ReviewService::new(store.clone()));

    routes::router()
        .layer(Extension(service))
        .layer(Extension(middleware::AuthState { jwt, store }))
}
