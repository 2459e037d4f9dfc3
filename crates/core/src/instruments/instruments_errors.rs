use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for instrument-related operations
#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for InstrumentError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => InstrumentError::NotFound("Record not found".to_string()),
            _ => InstrumentError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for instrument operations
pub type Result<T> = std::result::Result<T, InstrumentError>;
