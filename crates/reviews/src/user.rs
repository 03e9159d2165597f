use serde::{Deserialize, Serialize};

use emporium_auth::Role;
use emporium_core::UserId;

/// A user record, consulted only for authorization.
///
/// Inactive users authenticate as if they did not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub is_active: bool,
}

impl User {
    pub fn new(role: Role) -> Self {
        Self {
            id: UserId::new(),
            role,
            is_active: true,
        }
    }
}
