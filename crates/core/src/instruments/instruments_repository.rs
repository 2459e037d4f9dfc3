use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::instruments::{InstrumentError, Result};
use crate::schema::instruments::dsl::*;

use super::instruments_model::{Instrument, InstrumentDB};

/// Repository for reading the seeded instrument table
pub struct InstrumentRepository {
    pool: Arc<DbPool>,
}

impl InstrumentRepository {
    /// Creates a new InstrumentRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Looks an instrument up by its ticker name.
    pub fn find_by_name(&self, ticker: &str) -> Result<Option<Instrument>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InstrumentError::Unavailable(e.to_string()))?;

        instruments
            .filter(name.eq(ticker))
            .first::<InstrumentDB>(&mut conn)
            .optional()
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))
            .map(|row| row.map(Instrument::from))
    }

    /// Lists all tradable instruments, ordered by name.
    pub fn list(&self) -> Result<Vec<Instrument>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InstrumentError::Unavailable(e.to_string()))?;

        instruments
            .order(name.asc())
            .load::<InstrumentDB>(&mut conn)
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Instrument::from).collect())
    }
}
