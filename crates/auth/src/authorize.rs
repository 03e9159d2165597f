use thiserror::Error;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: requires the '{0}' role")]
    Forbidden(Role),
}

/// Authorize an actor role against the role an operation requires.
///
/// - No IO
/// - No panics
/// - Roles are disjoint: admins are not implicitly buyers, and vice versa.
pub fn authorize(actual: Role, required: Role) -> Result<(), AuthzError> {
    if actual == required {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required))
    }
}
