use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::auth::AuthError;
use crate::instruments::InstrumentError;
use crate::ledger::LedgerError;
use crate::users::UserError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the papertrade core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(e))
    }
}
