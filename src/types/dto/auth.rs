use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::auth::Principal;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// The authenticated identity as returned to clients
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PrincipalResponse {
    /// User ID (UUID)
    pub id: String,

    pub username: String,

    /// String-encoded role
    pub role: String,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            username: principal.username.clone(),
            role: principal.role.as_str().to_string(),
        }
    }
}

/// Response model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed token, also set as the auth cookie
    pub token: String,

    pub user: PrincipalResponse,
}
