//! Market data provider trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{CandleSeries, NewsArticle, Quote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. The
/// server holds a provider as a trait object, so tests can substitute a
/// canned implementation.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "FINNHUB". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch market news for a category, at most `limit` articles.
    async fn get_news(&self, category: &str, limit: usize)
        -> Result<Vec<NewsArticle>, MarketDataError>;

    /// Fetch historical daily candles for a symbol over a date range.
    ///
    /// Returns [`MarketDataError::NoData`] when the provider reports an
    /// empty range.
    async fn get_candles(
        &self,
        symbol: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<CandleSeries, MarketDataError>;
}
