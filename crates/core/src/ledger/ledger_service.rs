use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;

use crate::constants::BASE_CASH;
use crate::instruments::InstrumentRepositoryTrait;
use crate::ledger::ledger_model::{NewTransaction, Transaction, TransactionType};
use crate::ledger::{LedgerError, LedgerRepositoryTrait, LedgerServiceTrait, Result};

/// The only reader and writer of financial state. Balance is derived from
/// the ledger on every read; nothing here ever stores a balance.
pub struct LedgerService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
}

impl LedgerService {
    /// Creates a new LedgerService instance with injected dependencies
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            instrument_repository,
        }
    }
}

impl LedgerServiceTrait for LedgerService {
    /// Derives the account balance: starting cash plus sells minus buys.
    /// The result may be negative; no buying-power check exists.
    fn get_balance(&self, user_id: &str) -> Result<f64> {
        let totals = self.ledger_repository.sum_for_user(user_id)?;
        Ok(BASE_CASH + totals.sell_total - totals.buy_total)
    }

    fn post_transaction(
        &self,
        user_id: &str,
        instrument_name: &str,
        transaction_type: TransactionType,
        quantity: f64,
        unit_price: f64,
        date: DateTime<Utc>,
    ) -> Result<Transaction> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(LedgerError::InvalidData(
                "Quantity must be positive".to_string(),
            ));
        }
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(LedgerError::InvalidData(
                "Unit price must be positive".to_string(),
            ));
        }

        let instrument = self
            .instrument_repository
            .find_by_name(instrument_name)
            .map_err(LedgerError::from)?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("Instrument {} not found", instrument_name))
            })?;

        let amount = quantity * unit_price;
        debug!(
            "posting {} of {} for user {}: amount {}",
            transaction_type, instrument_name, user_id, amount
        );

        self.ledger_repository.append(NewTransaction {
            user_id: user_id.to_string(),
            instrument_id: instrument.id,
            transaction_type,
            transaction_date: date,
            amount,
        })
    }

    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.ledger_repository.list_for_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASE_CASH;
    use crate::db;
    use crate::instruments::InstrumentRepository;
    use crate::ledger::LedgerRepository;
    use crate::users::{NewUser, UserRepository};

    struct Fixture {
        service: LedgerService,
        ledger_repo: Arc<LedgerRepository>,
        user_id: String,
        // Holds the tempdir open for the lifetime of the test
        _tmp: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("ledger-test.db");
        let db_path = db_path.to_str().unwrap();
        db::init(db_path).unwrap();
        let pool = db::create_pool(db_path).unwrap();

        let user = UserRepository::new(pool.clone())
            .create(NewUser {
                username: "alice".to_string(),
                password_hash: "test-hash".to_string(),
            })
            .unwrap();

        let ledger_repo = Arc::new(LedgerRepository::new(pool.clone()));
        let service = LedgerService::new(
            ledger_repo.clone(),
            Arc::new(InstrumentRepository::new(pool)),
        );

        Fixture {
            service,
            ledger_repo,
            user_id: user.id,
            _tmp: tmp,
        }
    }

    #[test]
    fn fresh_account_starts_at_base_cash() {
        let fx = fixture();
        assert_eq!(fx.service.get_balance(&fx.user_id).unwrap(), BASE_CASH);
    }

    #[test]
    fn buy_then_sell_moves_balance_by_signed_amounts() {
        let fx = fixture();
        let now = Utc::now();

        fx.service
            .post_transaction(&fx.user_id, "AAPL", TransactionType::Buy, 10.0, 150.0, now)
            .unwrap();
        assert_eq!(fx.service.get_balance(&fx.user_id).unwrap(), 48_500.0);

        fx.service
            .post_transaction(&fx.user_id, "AAPL", TransactionType::Sell, 5.0, 160.0, now)
            .unwrap();
        assert_eq!(fx.service.get_balance(&fx.user_id).unwrap(), 49_300.0);
    }

    #[test]
    fn balance_matches_independent_fold_over_posting_sequence() {
        let fx = fixture();
        let now = Utc::now();
        let postings = [
            (TransactionType::Buy, 3.0, 120.5),
            (TransactionType::Sell, 1.0, 130.25),
            (TransactionType::Buy, 7.0, 99.0),
            (TransactionType::Sell, 2.0, 101.75),
            (TransactionType::Buy, 4.0, 250.0),
        ];

        let mut expected = BASE_CASH;
        for (tx_type, qty, price) in postings {
            fx.service
                .post_transaction(&fx.user_id, "MSFT", tx_type, qty, price, now)
                .unwrap();
            match tx_type {
                TransactionType::Buy => expected -= qty * price,
                TransactionType::Sell => expected += qty * price,
            }
        }

        assert_eq!(fx.service.get_balance(&fx.user_id).unwrap(), expected);
    }

    #[test]
    fn non_positive_quantity_is_rejected_and_ledger_unchanged() {
        let fx = fixture();
        let now = Utc::now();

        for (qty, price) in [(0.0, 100.0), (-1.0, 100.0), (10.0, 0.0), (10.0, -5.0)] {
            let err = fx
                .service
                .post_transaction(&fx.user_id, "AAPL", TransactionType::Buy, qty, price, now)
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidData(_)), "{:?}", err);
        }

        assert_eq!(fx.ledger_repo.count_for_user(&fx.user_id).unwrap(), 0);
        assert_eq!(fx.service.get_balance(&fx.user_id).unwrap(), BASE_CASH);
    }

    #[test]
    fn unknown_instrument_fails_not_found_and_ledger_unchanged() {
        let fx = fixture();

        let err = fx
            .service
            .post_transaction(
                &fx.user_id,
                "NOPE",
                TransactionType::Buy,
                1.0,
                10.0,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)), "{:?}", err);
        assert_eq!(fx.ledger_repo.count_for_user(&fx.user_id).unwrap(), 0);
    }

    #[test]
    fn transactions_are_listed_for_the_owning_user_only() {
        let fx = fixture();
        let now = Utc::now();
        fx.service
            .post_transaction(&fx.user_id, "TSLA", TransactionType::Buy, 2.0, 200.0, now)
            .unwrap();

        let listed = fx.service.get_transactions(&fx.user_id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 400.0);
        assert_eq!(listed[0].transaction_type, TransactionType::Buy);

        assert!(fx.service.get_transactions("someone-else").unwrap().is_empty());
    }
}
