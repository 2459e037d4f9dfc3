use thiserror::Error;

use crate::users::UserError;

/// Custom error type for authentication and session operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad credentials on login. Deliberately carries no detail about
    /// whether the username or the password was wrong.
    #[error("Invalid username or password")]
    Unauthorized,
    /// Missing, expired or unknown session token.
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Internal auth failure: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(msg) => AuthError::NotFound(msg),
            UserError::Conflict(msg) => AuthError::Conflict(msg),
            UserError::InvalidData(msg) => AuthError::InvalidData(msg),
            UserError::Unavailable(msg) => AuthError::Unavailable(msg),
            UserError::DatabaseError(msg) => AuthError::Internal(msg),
        }
    }
}

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
