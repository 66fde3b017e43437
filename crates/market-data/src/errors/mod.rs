//! Error types for the market data crate.
//!
//! This module provides [`MarketDataError`], the classification of every
//! outcome of a provider round trip other than HTTP 200 with a JSON body.
//! No variant carries retry state: each error is terminal for the call that
//! produced it, and [`is_transient`](MarketDataError::is_transient) only tells
//! the caller whether trying again later could help.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching data from the provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// The provider rejected a symbol it does not list (HTTP 4xx with code
    /// -1121 or a message mentioning the symbol).
    #[error("Invalid symbol error: {message}")]
    InvalidSymbol {
        /// Provider error code, when one was returned
        code: Option<i64>,
        /// Provider error message
        message: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limit exceeded (HTTP 429): {message}")]
    RateLimited {
        /// Provider error message
        message: String,
    },

    /// Any other HTTP 4xx response.
    #[error("API Error (HTTP {status}, Code {code}): {message}")]
    ClientError {
        /// HTTP status code
        status: u16,
        /// Provider error code, verbatim ("Unknown" when absent)
        code: String,
        /// Provider error message, verbatim
        message: String,
    },

    /// HTTP 5xx response.
    #[error("Binance server error (HTTP {status})")]
    ServerError {
        /// HTTP status code
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout after {}", describe_timeout(.timeout))]
    Timeout {
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// Connection or transport failure before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// A status outside the 2xx/4xx/5xx classes handled above.
    #[error("Unexpected HTTP status code: {0}")]
    UnexpectedStatus(u16),

    /// HTTP 200 whose body could not be parsed as JSON.
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse {
        /// Endpoint path that produced the body
        endpoint: &'static str,
        /// Parse failure description
        message: String,
    },
}

impl MarketDataError {
    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSymbol { .. } => "INVALID_SYMBOL",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::ClientError { .. } => "CLIENT_ERROR",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Network(_) => "NETWORK_ERROR",
            Self::UnexpectedStatus(_) => "UNEXPECTED_STATUS",
            Self::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }

    /// Whether the same request could succeed if the caller tries again later.
    ///
    /// Nothing in this crate acts on this; retrying is the caller's decision.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ServerError { .. } | Self::Timeout { .. } | Self::Network(_)
        )
    }
}

/// Whole seconds as `10 seconds`, anything finer as `2500 ms`.
fn describe_timeout(timeout: &Duration) -> String {
    if timeout.subsec_nanos() == 0 && timeout.as_secs() > 0 {
        format!("{} seconds", timeout.as_secs())
    } else {
        format!("{} ms", timeout.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_symbol_is_terminal() {
        let error = MarketDataError::InvalidSymbol {
            code: Some(-1121),
            message: "Invalid symbol.".to_string(),
        };
        assert!(!error.is_transient());
        assert_eq!(error.code(), "INVALID_SYMBOL");
    }

    #[test]
    fn test_transient_classes() {
        assert!(MarketDataError::RateLimited {
            message: "Too many requests".to_string()
        }
        .is_transient());
        assert!(MarketDataError::ServerError { status: 503 }.is_transient());
        assert!(MarketDataError::Timeout {
            timeout: Duration::from_secs(10)
        }
        .is_transient());
        assert!(MarketDataError::Network("connection refused".to_string()).is_transient());
    }

    #[test]
    fn test_client_error_is_terminal() {
        let error = MarketDataError::ClientError {
            status: 400,
            code: "-1100".to_string(),
            message: "Illegal characters found in parameter 'limit'".to_string(),
        };
        assert!(!error.is_transient());
        assert_eq!(error.code(), "CLIENT_ERROR");
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Timeout {
            timeout: Duration::from_secs(10),
        };
        assert_eq!(format!("{}", error), "Request timeout after 10 seconds");

        let error = MarketDataError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(format!("{}", error), "Request timeout after 250 ms");

        let error = MarketDataError::Timeout {
            timeout: Duration::from_millis(2500),
        };
        assert_eq!(format!("{}", error), "Request timeout after 2500 ms");

        let error = MarketDataError::ClientError {
            status: 400,
            code: "-1100".to_string(),
            message: "Bad parameter".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "API Error (HTTP 400, Code -1100): Bad parameter"
        );

        let error = MarketDataError::ServerError { status: 502 };
        assert_eq!(format!("{}", error), "Binance server error (HTTP 502)");
    }
}
