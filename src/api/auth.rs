use std::sync::Arc;

use poem::web::cookie::{Cookie, CookieJar};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::{Role, AUTH_COOKIE};
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::auth::{LoginRequest, LoginResponse, PrincipalResponse};
use crate::types::dto::common::MessageResponse;

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password; sets the auth cookie on success
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        cookie_jar: &CookieJar,
        body: Json<LoginRequest>,
    ) -> Result<Json<LoginResponse>, ApiError> {
        let user = self
            .user_store
            .verify_credentials(&body.username, &body.password)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("Invalid username or password"))?;

        let role = Role::parse(&user.role)
            .ok_or_else(|| ApiError::internal(format!("stored role '{}' is unknown", user.role)))?;

        let token = self.token_service.issue(&user.id, &user.username, role)?;

        let mut cookie = Cookie::new_with_str(AUTH_COOKIE, token.clone());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie_jar.add(cookie);

        Ok(Json(LoginResponse {
            token,
            user: PrincipalResponse {
                id: user.id,
                username: user.username,
                role: role.as_str().to_string(),
            },
        }))
    }

    /// Logout; clears the auth cookie
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, cookie_jar: &CookieJar) -> Json<MessageResponse> {
        cookie_jar.remove(AUTH_COOKIE);
        Json(MessageResponse::new("Logged out"))
    }

    /// Return the principal behind the presented token
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: CookieAuth) -> Result<Json<PrincipalResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        Ok(Json(PrincipalResponse::from(&principal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::ApiKey;
    use sea_orm::Database;

    use crate::stores::AuditStore;

    async fn setup() -> AuthApi {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let audit_store = Arc::new(AuditStore::new());
        let user_store = Arc::new(UserStore::new(
            db,
            "test-pepper-for-api-tests".to_string(),
            audit_store,
        ));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));

        user_store
            .create_user(
                "clerk",
                "clerk@school.test",
                "clerk-pass",
                Role::AdmissionStaff,
                "seed",
            )
            .await
            .expect("Failed to create test user");

        AuthApi::new(user_store, token_service)
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_sets_cookie() {
        let api = setup().await;
        let jar = CookieJar::default();

        let result = api
            .login(
                &jar,
                Json(LoginRequest {
                    username: "clerk".to_string(),
                    password: "clerk-pass".to_string(),
                }),
            )
            .await;

        let response = result.expect("login should succeed");
        assert!(!response.token.is_empty());
        assert_eq!(response.user.username, "clerk");
        assert_eq!(response.user.role, "ADMISSION_STAFF");

        let cookie = jar.get(AUTH_COOKIE).expect("auth cookie should be set");
        assert_eq!(cookie.value_str(), response.token);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_401() {
        let api = setup().await;
        let jar = CookieJar::default();

        let result = api
            .login(
                &jar,
                Json(LoginRequest {
                    username: "clerk".to_string(),
                    password: "not-the-password".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
        assert!(jar.get(AUTH_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_returns_401() {
        let api = setup().await;
        let jar = CookieJar::default();

        let result = api
            .login(
                &jar,
                Json(LoginRequest {
                    username: "nobody".to_string(),
                    password: "whatever".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_me_round_trips_the_issued_token() {
        let api = setup().await;
        let jar = CookieJar::default();

        let login = api
            .login(
                &jar,
                Json(LoginRequest {
                    username: "clerk".to_string(),
                    password: "clerk-pass".to_string(),
                }),
            )
            .await
            .expect("login should succeed");

        let me = api
            .me(CookieAuth(ApiKey {
                key: login.token.clone(),
            }))
            .await
            .expect("me should succeed");

        assert_eq!(me.id, login.user.id);
        assert_eq!(me.username, "clerk");
        assert_eq!(me.role, "ADMISSION_STAFF");
    }

    #[tokio::test]
    async fn test_me_with_garbage_token_returns_401() {
        let api = setup().await;

        let result = api
            .me(CookieAuth(ApiKey {
                key: "not-a-jwt".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
