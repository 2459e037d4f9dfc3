use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Double;
use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerError, Result};

/// Side of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            other => Err(LedgerError::InvalidData(format!(
                "Invalid transaction type '{}', expected 'buy' or 'sell'",
                other
            ))),
        }
    }
}

/// Domain model for an immutable ledger entry. `amount` is the full
/// monetary value of the trade (quantity * unit price), always positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Database model for ledger entries
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub transaction_type: String,
    pub transaction_date: NaiveDateTime,
    pub transaction_price: f64,
    pub created_at: NaiveDateTime,
}

/// Input model for appending a ledger entry
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: String,
    pub instrument_id: String,
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    pub amount: f64,
}

impl NewTransaction {
    /// Validates the entry before it reaches the database. The amount
    /// invariant is also enforced by a CHECK constraint, but rejecting here
    /// keeps the error typed instead of a raw constraint violation.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "User ID cannot be empty".to_string(),
            ));
        }
        if self.instrument_id.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "Instrument ID cannot be empty".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::InvalidData(
                "Transaction amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        // The stored type passed the CHECK constraint, so the parse cannot
        // fail for rows written by this crate.
        let tx_type = TransactionType::from_str(&db.transaction_type)
            .unwrap_or(TransactionType::Buy);
        Transaction {
            id: db.id,
            user_id: db.user_id,
            instrument_id: db.instrument_id,
            transaction_type: tx_type,
            transaction_date: DateTime::from_naive_utc_and_offset(db.transaction_date, Utc),
            amount: db.transaction_price,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}

/// Aggregate totals over a user's ledger, read in a single query so both
/// sums come from the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, QueryableByName)]
pub struct LedgerTotals {
    #[diesel(sql_type = Double)]
    pub buy_total: f64,
    #[diesel(sql_type = Double)]
    pub sell_total: f64,
}
