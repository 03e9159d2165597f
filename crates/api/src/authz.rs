//! API-side role guard, enforced per operation before touching the store.

use emporium_auth::{authorize, AuthzError, Role};

use crate::context::CurrentUser;

/// Check that the caller holds the role an operation requires.
///
/// Intended to be called at the top of a handler, before any storage access.
pub fn require_role(user: &CurrentUser, required: Role) -> Result<(), AuthzError> {
    authorize(user.role, required)
}
