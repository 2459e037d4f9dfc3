use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time quote for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    /// Current/last traded price.
    pub price: f64,
    /// Absolute change since the previous close.
    pub change: f64,
    /// Percent change since the previous close.
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    pub timestamp: DateTime<Utc>,
}
