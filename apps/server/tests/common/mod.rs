use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use tower::ServiceExt;

use papertrade_market_data::errors::MarketDataError;
use papertrade_market_data::{CandleSeries, MarketDataProvider, NewsArticle, Quote};
use papertrade_server::api::app_router;
use papertrade_server::config::Config;
use papertrade_server::build_state_with_provider;

/// Canned market data provider. With `fail` set it simulates an outage so
/// tests can check graceful degradation.
pub struct StubMarketData {
    pub fail: bool,
}

#[async_trait]
impl MarketDataProvider for StubMarketData {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        if self.fail {
            return Err(MarketDataError::Timeout {
                provider: "STUB".to_string(),
            });
        }
        Ok(Quote {
            symbol: symbol.to_string(),
            price: 100.0,
            change: 1.5,
            percent_change: 1.52,
            high: 101.0,
            low: 98.5,
            open: 99.0,
            previous_close: 98.5,
            timestamp: Utc.timestamp_opt(1_703_275_200, 0).single().unwrap(),
        })
    }

    async fn get_news(
        &self,
        _category: &str,
        limit: usize,
    ) -> Result<Vec<NewsArticle>, MarketDataError> {
        if self.fail {
            return Err(MarketDataError::Timeout {
                provider: "STUB".to_string(),
            });
        }
        let article = NewsArticle {
            headline: "Markets rally".to_string(),
            summary: "Stocks up across the board".to_string(),
            image: None,
            source: Some("Stub".to_string()),
            url: None,
            published_at: None,
        };
        Ok(vec![article; limit.min(3)])
    }

    async fn get_candles(
        &self,
        symbol: &str,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<CandleSeries, MarketDataError> {
        if self.fail {
            return Err(MarketDataError::Timeout {
                provider: "STUB".to_string(),
            });
        }
        Ok(CandleSeries {
            symbol: symbol.to_string(),
            opens: vec![100.0, 101.5],
            highs: vec![102.0, 103.0],
            lows: vec![99.5, 101.0],
            closes: vec![101.0, 102.5],
            volumes: vec![1000.0, 1200.0],
            timestamps: vec![1_703_203_200, 1_703_289_600],
        })
    }
}

pub struct TestApp {
    pub router: axum::Router,
    // Holds the scratch database directory open for the test's lifetime
    _tmp: TempDir,
}

pub fn test_app(fail_market: bool) -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: db_path.to_str().unwrap().to_string(),
        finnhub_api_key: None,
        session_ttl: Duration::from_secs(3600),
        request_timeout: Duration::from_secs(5),
    };
    let state =
        build_state_with_provider(&config, Arc::new(StubMarketData { fail: fail_market }))
            .unwrap();
    TestApp {
        router: app_router(state, &config),
        _tmp: tmp,
    }
}

pub async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Pulls the session cookie pair out of a login response.
pub fn session_cookie_from(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

/// Registers a user and logs in, returning the session cookie.
pub async fn register_and_login(app: &axum::Router, username: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "username": username, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), 302);

    let response = post_json(
        app,
        "/login",
        serde_json::json!({ "username": username, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), 302);
    session_cookie_from(&response)
}
