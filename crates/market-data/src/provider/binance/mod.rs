//! Binance public Spot API provider implementation.
//!
//! This module provides read-only market data from the Binance data host:
//! - 24h statistics, latest prices, and best bid/ask via /api/v3/ticker/*
//! - Trading rules and pair metadata via /api/v3/exchangeInfo
//! - Order book depth via /api/v3/depth
//! - Candlesticks via /api/v3/klines
//! - Recent trades via /api/v3/trades
//!
//! All endpoints are unauthenticated. Limits are expressed in request weight
//! (6000 per minute per IP).
//! API documentation: https://developers.binance.com/docs/binance-spot-api-docs/rest-api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::{present_params, ClientConfig, Endpoint, QueryParam, SpotMarketApi};

/// Provider error code for an unknown or malformed symbol.
const INVALID_SYMBOL_CODE: i64 = -1121;

// ============================================================================
// API Response Structures
// ============================================================================

/// Error body returned with 4xx responses, e.g. `{"code":-1121,"msg":"Invalid symbol."}`
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    code: Option<i64>,
    msg: Option<String>,
}

impl ErrorResponse {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn message(&self) -> String {
        self.msg.clone().unwrap_or_else(|| "Unknown error".to_string())
    }
}

// ============================================================================
// BinanceProvider
// ============================================================================

/// Binance Spot market data provider.
///
/// Holds one pooled `reqwest::Client`. The client carries no cookie store and
/// no credentials, so connection reuse is the only state shared across calls.
pub struct BinanceProvider {
    client: Client,
    config: ClientConfig,
}

impl BinanceProvider {
    /// Create a new provider with the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait]
impl SpotMarketApi for BinanceProvider {
    async fn fetch(&self, endpoint: Endpoint, params: &[QueryParam]) -> Result<Value, MarketDataError> {
        let query = present_params(params);

        debug!(
            "Binance request: {} with {} params",
            endpoint,
            query.len()
        );

        let response = self
            .client
            .get(self.url(endpoint))
            .query(&query)
            .send()
            .await
            .map_err(|e| classify_transport(&e, self.config.request_timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(&e, self.config.request_timeout))?;

        let result = classify_response(endpoint, status, &body);
        if let Err(ref e) = result {
            warn!("Binance request to {} failed: {}", endpoint, e);
        }
        result
    }
}

/// Map a transport-level failure (no usable response) onto the taxonomy.
fn classify_transport(error: &reqwest::Error, timeout: Duration) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout { timeout }
    } else {
        MarketDataError::Network(error.to_string())
    }
}

/// Map an HTTP status and body onto the taxonomy.
///
/// Kept free of I/O so every branch can be exercised directly.
pub fn classify_response(
    endpoint: Endpoint,
    status: StatusCode,
    body: &str,
) -> Result<Value, MarketDataError> {
    if status == StatusCode::OK {
        return serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            endpoint: endpoint.path(),
            message: e.to_string(),
        });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            message: ErrorResponse::parse(body).message(),
        });
    }

    if status.is_client_error() {
        let error = ErrorResponse::parse(body);
        let message = error.message();

        if error.code == Some(INVALID_SYMBOL_CODE) || message.to_lowercase().contains("symbol") {
            return Err(MarketDataError::InvalidSymbol {
                code: error.code,
                message,
            });
        }

        return Err(MarketDataError::ClientError {
            status: status.as_u16(),
            code: error
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            message,
        });
    }

    if status.is_server_error() {
        return Err(MarketDataError::ServerError {
            status: status.as_u16(),
        });
    }

    Err(MarketDataError::UnexpectedStatus(status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_base_and_path() {
        let provider = BinanceProvider::new(ClientConfig::default().with_base_url("http://localhost:9000/"));
        assert_eq!(
            provider.url(Endpoint::Klines),
            "http://localhost:9000/api/v3/klines"
        );
    }

    #[test]
    fn test_default_config() {
        let provider = BinanceProvider::default();
        assert_eq!(provider.config.request_timeout, Duration::from_secs(10));
        assert_eq!(
            provider.url(Endpoint::TickerPrice),
            "https://data-api.binance.vision/api/v3/ticker/price"
        );
    }

    #[test]
    fn test_ok_returns_parsed_body() {
        let body = r#"{"symbol":"BTCUSDT","price":"50000.12"}"#;
        let value = classify_response(Endpoint::TickerPrice, StatusCode::OK, body).unwrap();
        assert_eq!(value, json!({"symbol": "BTCUSDT", "price": "50000.12"}));
    }

    #[test]
    fn test_ok_with_garbage_body() {
        let result = classify_response(Endpoint::Depth, StatusCode::OK, "<html>");
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidResponse { endpoint: "/api/v3/depth", .. })
        ));
    }

    #[test]
    fn test_rate_limited() {
        let body = r#"{"code":-1003,"msg":"Too much request weight used."}"#;
        let result = classify_response(Endpoint::Ticker24h, StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::RateLimited {
                message: "Too much request weight used.".to_string()
            }
        );
    }

    #[test]
    fn test_rate_limited_without_json_body() {
        let result = classify_response(Endpoint::Ticker24h, StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::RateLimited {
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_symbol_by_code() {
        let body = r#"{"code":-1121,"msg":"Invalid request."}"#;
        let result = classify_response(Endpoint::Depth, StatusCode::BAD_REQUEST, body);
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidSymbol { code: Some(-1121), .. })
        ));
    }

    #[test]
    fn test_invalid_symbol_by_message() {
        let body = r#"{"code":-1100,"msg":"Illegal characters found in parameter 'symbol'"}"#;
        let result = classify_response(Endpoint::Trades, StatusCode::BAD_REQUEST, body);
        assert!(matches!(result, Err(MarketDataError::InvalidSymbol { .. })));
    }

    #[test]
    fn test_other_client_error_is_verbatim() {
        let body = r#"{"code":-1100,"msg":"Illegal characters found in parameter 'limit'"}"#;
        let result = classify_response(Endpoint::Klines, StatusCode::BAD_REQUEST, body);
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::ClientError {
                status: 400,
                code: "-1100".to_string(),
                message: "Illegal characters found in parameter 'limit'".to_string(),
            }
        );
    }

    #[test]
    fn test_client_error_without_body() {
        let result = classify_response(Endpoint::Klines, StatusCode::FORBIDDEN, "");
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::ClientError {
                status: 403,
                code: "Unknown".to_string(),
                message: "Unknown error".to_string(),
            }
        );
    }

    #[test]
    fn test_server_error() {
        let result = classify_response(Endpoint::Klines, StatusCode::BAD_GATEWAY, "");
        assert_eq!(result.unwrap_err(), MarketDataError::ServerError { status: 502 });
    }

    #[test]
    fn test_unexpected_status() {
        let result = classify_response(Endpoint::Klines, StatusCode::MOVED_PERMANENTLY, "");
        assert_eq!(result.unwrap_err(), MarketDataError::UnexpectedStatus(301));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let provider = BinanceProvider::new(
            ClientConfig::default()
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_secs(2)),
        );
        let result = provider.fetch(Endpoint::TickerPrice, &[]).await;
        assert!(matches!(
            result,
            Err(MarketDataError::Network(_)) | Err(MarketDataError::Timeout { .. })
        ));
    }
}
