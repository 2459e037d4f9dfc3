use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;

use crate::db::{get_connection, DbPool};
use crate::ledger::{LedgerError, Result};
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;

use super::ledger_model::{LedgerTotals, NewTransaction, Transaction, TransactionDB};

/// Repository for the append-only transaction ledger.
///
/// There is no update or delete here on purpose: rows are immutable once
/// written, which is what makes the derived balance race-free.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Appends a validated entry to the ledger. A single atomic insert is
    /// the only side effect, so there is nothing to roll back on failure.
    pub fn append(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;

        let transaction_db = TransactionDB {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new_transaction.user_id,
            instrument_id: new_transaction.instrument_id,
            transaction_type: new_transaction.transaction_type.as_str().to_string(),
            transaction_date: new_transaction.transaction_date.naive_utc(),
            transaction_price: new_transaction.amount,
            created_at: Utc::now().naive_utc(),
        };

        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        diesel::insert_into(transactions::table)
            .values(&transaction_db)
            .execute(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        Ok(transaction_db.into())
    }

    /// Returns buy and sell totals for a user from one aggregate query.
    /// Both sums must come from the same read so a concurrent append is
    /// either fully visible in the result or not at all.
    pub fn sum_for_user(&self, owner_id: &str) -> Result<LedgerTotals> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        sql_query(
            "SELECT \
                 COALESCE(SUM(CASE WHEN transaction_type = 'buy' THEN transaction_price ELSE 0 END), 0) AS buy_total, \
                 COALESCE(SUM(CASE WHEN transaction_type = 'sell' THEN transaction_price ELSE 0 END), 0) AS sell_total \
             FROM transactions \
             WHERE user_id = ?",
        )
        .bind::<Text, _>(owner_id)
        .get_result::<LedgerTotals>(&mut conn)
        .map_err(|e| LedgerError::DatabaseError(e.to_string()))
    }

    /// Lists a user's ledger entries, newest first.
    pub fn list_for_user(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        transactions::table
            .filter(user_id.eq(owner_id))
            .order(transaction_date.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
    }

    /// Counts a user's ledger entries.
    pub fn count_for_user(&self, owner_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        transactions::table
            .filter(user_id.eq(owner_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))
    }
}
