use std::time::Duration;

use papertrade_core::constants::DEFAULT_SESSION_TTL_SECS;

/// Server configuration, read from the environment once at startup.
///
/// The Finnhub key is the only secret and it never appears in logs or
/// responses; a missing key leaves market data degraded rather than
/// preventing startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub finnhub_api_key: Option<String>,
    pub session_ttl: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("PT_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let db_path =
            std::env::var("PT_DB_PATH").unwrap_or_else(|_| "data/papertrade.db".to_string());
        let finnhub_api_key = std::env::var("PT_FINNHUB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let session_ttl_secs = std::env::var("PT_SESSION_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);
        let request_timeout_secs = std::env::var("PT_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(30);

        Self {
            listen_addr,
            db_path,
            finnhub_api_key,
            session_ttl: Duration::from_secs(session_ttl_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
