//! Finnhub market data provider implementation.
//!
//! This module provides market data from the Finnhub API:
//! - Quotes via /quote
//! - General market news via /news
//! - Historical daily candles via /stock/candle
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{CandleSeries, NewsArticle, Quote};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// High price of the day
    h: Option<f64>,
    /// Low price of the day
    l: Option<f64>,
    /// Open price of the day
    o: Option<f64>,
    /// Previous close price
    pc: Option<f64>,
    /// Timestamp (Unix)
    t: Option<i64>,
}

/// Item from the /news endpoint
#[derive(Debug, Deserialize)]
struct NewsItem {
    headline: Option<String>,
    summary: Option<String>,
    image: Option<String>,
    source: Option<String>,
    url: Option<String>,
    /// Published timestamp (Unix)
    datetime: Option<i64>,
}

/// Response from /stock/candle endpoint
#[derive(Debug, Deserialize)]
struct CandleResponse {
    /// Status: "ok" or "no_data"
    s: String,
    /// Close prices
    #[serde(default)]
    c: Vec<f64>,
    /// High prices
    #[serde(default)]
    h: Vec<f64>,
    /// Low prices
    #[serde(default)]
    l: Vec<f64>,
    /// Open prices
    #[serde(default)]
    o: Vec<f64>,
    /// Volume
    #[serde(default)]
    v: Vec<f64>,
    /// Timestamps (Unix)
    #[serde(default)]
    t: Vec<i64>,
}

/// Error response from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub market data provider.
///
/// The API key comes from configuration and is sent as a request header,
/// never logged and never part of a URL.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key);

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("finnhub request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

fn parse_quote(symbol: &str, body: &str) -> Result<Quote, MarketDataError> {
    let resp: QuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse quote response: {}", e),
        })?;

    // Finnhub answers unknown symbols with an all-zero quote body.
    let price = resp.c.unwrap_or(0.0);
    if price <= 0.0 {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    let timestamp = resp
        .t
        .and_then(|t| Utc.timestamp_opt(t, 0).single())
        .unwrap_or_else(Utc::now);

    Ok(Quote {
        symbol: symbol.to_string(),
        price,
        change: resp.d.unwrap_or(0.0),
        percent_change: resp.dp.unwrap_or(0.0),
        high: resp.h.unwrap_or(0.0),
        low: resp.l.unwrap_or(0.0),
        open: resp.o.unwrap_or(0.0),
        previous_close: resp.pc.unwrap_or(0.0),
        timestamp,
    })
}

fn parse_news(body: &str, limit: usize) -> Result<Vec<NewsArticle>, MarketDataError> {
    let items: Vec<NewsItem> =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse news response: {}", e),
        })?;

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let headline = item.headline?;
            Some(NewsArticle {
                headline,
                summary: item.summary.unwrap_or_default(),
                image: item.image.filter(|s| !s.is_empty()),
                source: item.source,
                url: item.url,
                published_at: item
                    .datetime
                    .and_then(|t| Utc.timestamp_opt(t, 0).single()),
            })
        })
        .take(limit)
        .collect())
}

fn parse_candles(symbol: &str, body: &str) -> Result<CandleSeries, MarketDataError> {
    let resp: CandleResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse candle response: {}", e),
        })?;

    if resp.s != "ok" || resp.t.is_empty() {
        return Err(MarketDataError::NoData);
    }

    Ok(CandleSeries {
        symbol: symbol.to_string(),
        opens: resp.o,
        highs: resp.h,
        lows: resp.l,
        closes: resp.c,
        volumes: resp.v,
        timestamps: resp.t,
    })
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let body = self.fetch("/quote", &[("symbol", symbol)]).await?;
        parse_quote(symbol, &body)
    }

    async fn get_news(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<NewsArticle>, MarketDataError> {
        let body = self.fetch("/news", &[("category", category)]).await?;
        parse_news(&body, limit)
    }

    async fn get_candles(
        &self,
        symbol: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<CandleSeries, MarketDataError> {
        let from_ts = from.timestamp().to_string();
        let to_ts = to.timestamp().to_string();
        let body = self
            .fetch(
                "/stock/candle",
                &[
                    ("symbol", symbol),
                    ("resolution", "D"),
                    ("from", &from_ts),
                    ("to", &to_ts),
                ],
            )
            .await?;
        parse_candles(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_regular_quote() {
        let body = r#"{"c":178.72,"d":-1.05,"dp":-0.5842,"h":180.71,"l":177.58,"o":180.17,"pc":179.77,"t":1703275201}"#;
        let quote = parse_quote("AAPL", body).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 178.72);
        assert_eq!(quote.change, -1.05);
        assert_eq!(quote.previous_close, 179.77);
    }

    #[test]
    fn zeroed_quote_means_unknown_symbol() {
        let body = r#"{"c":0,"d":null,"dp":null,"h":0,"l":0,"o":0,"pc":0,"t":0}"#;
        let err = parse_quote("NOPE", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)), "{:?}", err);
    }

    #[test]
    fn news_is_truncated_to_limit_and_skips_headline_less_items() {
        let body = r#"[
            {"headline":"Markets rally","summary":"Stocks up","image":"https://x/1.png","source":"Reuters","url":"https://x/1","datetime":1703275201},
            {"summary":"no headline here"},
            {"headline":"Fed holds rates","summary":"","image":"","datetime":1703275300},
            {"headline":"Extra article","summary":"beyond the limit"}
        ]"#;
        let news = parse_news(body, 2).unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].headline, "Markets rally");
        assert_eq!(news[0].image.as_deref(), Some("https://x/1.png"));
        // Empty image strings collapse to None
        assert_eq!(news[1].image, None);
    }

    #[test]
    fn candle_no_data_status_maps_to_no_data() {
        let body = r#"{"s":"no_data"}"#;
        let err = parse_candles("AAPL", body).unwrap_err();
        assert!(matches!(err, MarketDataError::NoData), "{:?}", err);
    }

    #[test]
    fn candle_arrays_are_carried_through() {
        let body = r#"{"s":"ok","c":[101.0,102.5],"h":[102.0,103.0],"l":[99.5,101.0],"o":[100.0,101.5],"v":[1000.0,1200.0],"t":[1703203200,1703289600]}"#;
        let series = parse_candles("AAPL", body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes, vec![101.0, 102.5]);
        assert_eq!(series.timestamps, vec![1703203200, 1703289600]);
    }
}
