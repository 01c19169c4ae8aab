use crate::auth::role::{Capability, Role};
use crate::errors::api::ApiError;

/// The authenticated identity derived from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Check this principal against the capability table.
    ///
    /// Fails with a 403 naming the required role(s) when the principal's
    /// role is not in the capability's allowed set.
    pub fn authorize(&self, capability: Capability) -> Result<(), ApiError> {
        if self.role.allows(capability) {
            Ok(())
        } else {
            Err(ApiError::forbidden(capability))
        }
    }
}
