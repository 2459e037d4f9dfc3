// Module declarations
pub(crate) mod instruments_errors;
pub(crate) mod instruments_model;
pub(crate) mod instruments_repository;
pub(crate) mod instruments_traits;

// Re-export the public interface
pub use instruments_model::{Instrument, InstrumentDB};
pub use instruments_repository::InstrumentRepository;
pub use instruments_traits::InstrumentRepositoryTrait;

// Re-export error types for convenience
pub use instruments_errors::{InstrumentError, Result};
