//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// [`retryable`](Self::retryable) marks the transient subset; those surface
/// to clients as a retryable "unavailable" condition rather than a hard
/// failure.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but the provider returned an empty result set for
    /// the requested range.
    #[error("No data for request")]
    NoData,

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a caller may reasonably retry the same request later.
    pub fn retryable(&self) -> bool {
        match self {
            Self::SymbolNotFound(_) | Self::NoData | Self::ProviderError { .. } => false,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_not_found_is_terminal() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert!(!error.retryable());
    }

    #[test]
    fn no_data_is_terminal() {
        assert!(!MarketDataError::NoData.retryable());
    }

    #[test]
    fn rate_limited_is_retryable() {
        let error = MarketDataError::RateLimited {
            provider: "FINNHUB".to_string(),
        };
        assert!(error.retryable());
    }

    #[test]
    fn timeout_is_retryable() {
        let error = MarketDataError::Timeout {
            provider: "FINNHUB".to_string(),
        };
        assert!(error.retryable());
    }

    #[test]
    fn provider_error_is_terminal() {
        let error = MarketDataError::ProviderError {
            provider: "FINNHUB".to_string(),
            message: "API key invalid".to_string(),
        };
        assert!(!error.retryable());
    }

    #[test]
    fn error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::ProviderError {
            provider: "FINNHUB".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: FINNHUB - API key invalid"
        );
    }
}
