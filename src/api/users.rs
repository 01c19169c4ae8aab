use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::{Capability, Role};
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::user::{CreateUserApiResponse, CreateUserRequest, UserResponse};

/// User administration endpoints
pub struct UsersApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl UsersApi {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User administration
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// Create a back-office user
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn create_user(
        &self,
        auth: CookieAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<CreateUserApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageUsers)?;

        let role = Role::parse(&body.role)
            .ok_or_else(|| ApiError::validation(format!("Unknown role: {}", body.role)))?;

        let user = self
            .user_store
            .create_user(&body.username, &body.email, &body.password, role, &principal.id)
            .await?;

        Ok(CreateUserApiResponse::Created(Json(user.into())))
    }

    /// List all users
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self, auth: CookieAuth) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageUsers)?;

        let users = self.user_store.list_users().await?;
        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    /// Deactivate a user (soft delete; super admin is protected)
    #[oai(path = "/:id/deactivate", method = "post", tag = "UserTags::Users")]
    async fn deactivate_user(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageUsers)?;

        let user = self.user_store.deactivate_user(&id.0, &principal.id).await?;
        Ok(Json(user.into()))
    }
}
