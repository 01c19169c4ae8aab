use thiserror::Error;

/// Internal error type for store operations.
///
/// Not exposed over HTTP - the API layer converts these into `ApiError`
/// (NotFound → 404, Duplicate → 409, Rule → 400, everything else → 500
/// with the detail kept server-side).
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("database error in {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{what} already exists")]
    Duplicate { what: String },

    /// Business-rule violation with a caller-facing message
    #[error("{0}")]
    Rule(String),

    #[error("crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// Stored data failed to decode (e.g. unknown status string)
    #[error("invalid stored state: {0}")]
    State(String),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        InternalError::NotFound { entity }
    }

    pub fn duplicate(what: impl Into<String>) -> Self {
        InternalError::Duplicate { what: what.into() }
    }

    pub fn rule(message: impl Into<String>) -> Self {
        InternalError::Rule(message.into())
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> Self {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Uniqueness-violation check for insert races that slip past pre-checks
    pub fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
        e.to_string().contains("UNIQUE")
    }
}

/// Token verification failures, mapped to 401 by the API layer
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("failed to issue token: {0}")]
    Issue(String),
}
