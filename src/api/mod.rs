// API layer - HTTP endpoint groups
pub mod academics;
pub mod auth;
pub mod documents;
pub mod fees;
pub mod health;
pub mod students;
pub mod users;

pub use academics::AcademicsApi;
pub use auth::AuthApi;
pub use documents::DocumentsApi;
pub use fees::FeesApi;
pub use health::HealthApi;
pub use students::StudentsApi;
pub use users::UsersApi;

use poem_openapi::{auth::ApiKey, SecurityScheme};

use crate::auth::Principal;
use crate::errors::ApiError;
use crate::services::TokenService;

/// Signed auth token carried in the `admit_token` cookie
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "admit_token", key_in = "cookie")]
pub struct CookieAuth(pub ApiKey);

/// Verify the cookie token and produce the request principal
pub(crate) fn authenticate(
    tokens: &TokenService,
    auth: &CookieAuth,
) -> Result<Principal, ApiError> {
    Ok(tokens.verify(&auth.0.key)?)
}
