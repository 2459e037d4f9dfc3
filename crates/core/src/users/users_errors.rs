use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for user-related operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for UserError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => UserError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                UserError::Conflict("Username already exists".to_string())
            }
            _ => UserError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for user operations
pub type Result<T> = std::result::Result<T, UserError>;
