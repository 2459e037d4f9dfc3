use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for LedgerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => LedgerError::NotFound("Record not found".to_string()),
            _ => LedgerError::DatabaseError(err.to_string()),
        }
    }
}

impl From<crate::instruments::InstrumentError> for LedgerError {
    fn from(err: crate::instruments::InstrumentError) -> Self {
        match err {
            crate::instruments::InstrumentError::NotFound(msg) => LedgerError::NotFound(msg),
            crate::instruments::InstrumentError::Unavailable(msg) => LedgerError::Unavailable(msg),
            crate::instruments::InstrumentError::DatabaseError(msg) => {
                LedgerError::DatabaseError(msg)
            }
        }
    }
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
