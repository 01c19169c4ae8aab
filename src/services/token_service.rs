use std::fmt;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::{Principal, Role};
use crate::errors::internal::TokenError;

/// JWT claims carried by the auth cookie
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Username at issue time
    pub username: String,

    /// String-encoded role
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Issues and verifies the signed tokens carried by the auth cookie.
///
/// `verify` is the whole token-service capability the handlers consume:
/// token in, `Principal {id, username, role}` out.
pub struct TokenService {
    jwt_secret: String,
    expiration_minutes: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            expiration_minutes: 8 * 60, // one working day
        }
    }

    /// Issue a signed token for the given identity
    pub fn issue(&self, user_id: &str, username: &str, role: Role) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: now + self.expiration_minutes * 60,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Verify signature and expiry, and decode the claims into a Principal
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                TokenError::Expired
            } else {
                TokenError::Invalid
            }
        })?;

        let claims = token_data.claims;
        let role = Role::parse(&claims.role).ok_or(TokenError::Invalid)?;

        Ok(Principal {
            id: claims.sub,
            username: claims.username,
            role,
        })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}
