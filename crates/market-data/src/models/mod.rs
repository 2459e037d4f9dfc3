//! Data models shared by all market data providers.

mod candles;
mod news;
mod quote;

pub use candles::CandleSeries;
pub use news::NewsArticle;
pub use quote::Quote;
