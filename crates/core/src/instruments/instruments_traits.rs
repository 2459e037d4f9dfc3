use super::instruments_model::Instrument;
use super::instruments_repository::InstrumentRepository;
use crate::instruments::Result;

/// Trait defining the contract for instrument repository operations.
pub trait InstrumentRepositoryTrait: Send + Sync {
    fn find_by_name(&self, ticker: &str) -> Result<Option<Instrument>>;
    fn list(&self) -> Result<Vec<Instrument>>;
}

impl InstrumentRepositoryTrait for InstrumentRepository {
    fn find_by_name(&self, ticker: &str) -> Result<Option<Instrument>> {
        InstrumentRepository::find_by_name(self, ticker)
    }

    fn list(&self) -> Result<Vec<Instrument>> {
        InstrumentRepository::list(self)
    }
}
