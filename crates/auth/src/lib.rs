//! `emporium-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models
//! token claims, roles, and pure policy checks. Resolving a claims subject to
//! a stored user record is the caller's concern.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod roles;

pub use authorize::{authorize, AuthzError};
pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use roles::Role;
