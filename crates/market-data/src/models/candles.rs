use serde::{Deserialize, Serialize};

/// Historical OHLCV series in the columnar layout the charting frontend
/// consumes. All vectors have the same length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleSeries {
    pub symbol: String,
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
    /// Unix timestamps, seconds, ascending.
    pub timestamps: Vec<i64>,
}

impl CandleSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
