use chrono::{DateTime, Utc};

use super::ledger_model::{LedgerTotals, NewTransaction, Transaction, TransactionType};
use super::ledger_repository::LedgerRepository;
use crate::ledger::Result;

/// Trait defining the contract for ledger repository operations.
pub trait LedgerRepositoryTrait: Send + Sync {
    fn append(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    fn sum_for_user(&self, owner_id: &str) -> Result<LedgerTotals>;
    fn list_for_user(&self, owner_id: &str) -> Result<Vec<Transaction>>;
    fn count_for_user(&self, owner_id: &str) -> Result<i64>;
}

impl LedgerRepositoryTrait for LedgerRepository {
    fn append(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        LedgerRepository::append(self, new_transaction)
    }

    fn sum_for_user(&self, owner_id: &str) -> Result<LedgerTotals> {
        LedgerRepository::sum_for_user(self, owner_id)
    }

    fn list_for_user(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        LedgerRepository::list_for_user(self, owner_id)
    }

    fn count_for_user(&self, owner_id: &str) -> Result<i64> {
        LedgerRepository::count_for_user(self, owner_id)
    }
}

/// Trait defining the contract for ledger service operations.
pub trait LedgerServiceTrait: Send + Sync {
    fn get_balance(&self, user_id: &str) -> Result<f64>;
    #[allow(clippy::too_many_arguments)]
    fn post_transaction(
        &self,
        user_id: &str,
        instrument_name: &str,
        transaction_type: TransactionType,
        quantity: f64,
        unit_price: f64,
        date: DateTime<Utc>,
    ) -> Result<Transaction>;
    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}
