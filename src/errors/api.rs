use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::auth::Capability;
use crate::errors::internal::{InternalError, TokenError};

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// API error taxonomy.
///
/// Validation and business-rule failures are 400, missing/invalid token is
/// 401, insufficient role is 403 (naming the required roles), missing
/// entities are 404, uniqueness conflicts are 409, and anything unexpected
/// is a 500 whose detail is logged server-side only.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing/malformed input or business-rule violation
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// No token, or an invalid/expired token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Valid principal, insufficient role
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Referenced entity absent
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Uniqueness conflict
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Store or infrastructure failure
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorBody {
            error: "validation_failed".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    /// 403 naming the role(s) the capability requires
    pub fn forbidden(capability: Capability) -> Self {
        ApiError::Forbidden(Json(ErrorBody {
            error: "forbidden".to_string(),
            message: format!("Requires role: {}", capability.role_names()),
            status_code: 403,
        }))
    }

    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: format!("{} not found", entity),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorBody {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    /// Log the detail server-side and return a generic body to the caller
    pub fn internal(detail: impl fmt::Display) -> Self {
        tracing::error!("internal error: {}", detail);
        ApiError::Internal(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::Internal(json) => &json.0.message,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::NotFound { entity } => ApiError::not_found(entity),
            InternalError::Duplicate { what } => {
                ApiError::conflict(format!("{} already exists", what))
            }
            InternalError::Rule(message) => ApiError::validation(message),
            other @ (InternalError::Database { .. }
            | InternalError::Crypto { .. }
            | InternalError::State(_)) => ApiError::internal(other),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::unauthenticated("Token has expired"),
            TokenError::Invalid => ApiError::unauthenticated("Invalid token"),
            TokenError::Issue(detail) => ApiError::internal(detail),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
