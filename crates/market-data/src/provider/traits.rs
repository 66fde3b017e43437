//! Market data API trait definition.
//!
//! This module defines the `SpotMarketApi` trait that the tool layer talks to.
//! `BinanceProvider` is the network implementation; tests substitute canned
//! implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MarketDataError;

use super::endpoint::{Endpoint, QueryParam};

/// Read-only access to the provider's public endpoints.
///
/// One call is exactly one round trip. Implementations must not retry, cache,
/// or keep state between calls.
///
/// # Example
///
/// ```ignore
/// use binance_market_data::{Endpoint, SpotMarketApi};
///
/// async fn last_price(api: &dyn SpotMarketApi) -> Result<serde_json::Value, MarketDataError> {
///     api.fetch(
///         Endpoint::TickerPrice,
///         &[("symbol", Some("BTCUSDT".to_string()))],
///     )
///     .await
/// }
/// ```
#[async_trait]
pub trait SpotMarketApi: Send + Sync {
    /// Issue a GET to `endpoint` and return the parsed JSON body.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Which provider endpoint to call
    /// * `params` - Query parameters; entries whose value is `None` are dropped
    ///
    /// # Returns
    ///
    /// The decoded body on HTTP 200, or a classified `MarketDataError`.
    async fn fetch(&self, endpoint: Endpoint, params: &[QueryParam]) -> Result<Value, MarketDataError>;
}
