use emporium_auth::Role;
use emporium_core::UserId;

/// Authenticated caller for a request.
///
/// Built by the auth layer in [`crate::middleware`]: the bearer token proves
/// the identity, the user store supplies the role. Handlers that take this as
/// an extractor are authenticated; role checks happen per operation via
/// [`crate::authz`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}
