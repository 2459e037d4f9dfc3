//! Market data collaborator for the papertrade server.
//!
//! Everything here is best-effort external data: callers are expected to
//! degrade gracefully when a provider is unavailable rather than fail the
//! whole request.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{CandleSeries, NewsArticle, Quote};
pub use provider::{FinnhubProvider, MarketDataProvider};
