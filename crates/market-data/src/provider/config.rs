//! Client configuration.

use std::time::Duration;

/// Public market-data host. No authentication is required.
pub const DEFAULT_BASE_URL: &str = "https://data-api.binance.vision";

/// Per-request timeout recommended by the provider.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request weight the provider allows per minute per IP.
pub const REQUEST_WEIGHT_PER_MINUTE: u32 = 6000;

/// Connection settings for [`BinanceProvider`](super::binance::BinanceProvider).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme and host, without a trailing path.
    pub base_url: String,

    /// Applied to every request; elapsed timeouts surface as
    /// `MarketDataError::Timeout`.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
