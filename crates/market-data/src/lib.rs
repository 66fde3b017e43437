//! Binance Market Data Crate
//!
//! This crate provides read-only access to the Binance public Spot API for
//! the tool layer.
//!
//! # Overview
//!
//! - One HTTP GET per logical call, no retries, no caching
//! - Every non-success outcome is classified into [`MarketDataError`]
//! - Lenient typed views over the provider's JSON payloads
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |    Tool layer    | --> |  SpotMarketApi   |  (trait seam)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | BinanceProvider  |  (reqwest, fixed timeout)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | classify_response|  (status -> taxonomy)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  models (lenient)|  (Ticker24h, OrderBook, ...)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SpotMarketApi`] - `fetch(endpoint, params) -> JSON`
//! - [`Endpoint`] - The seven public endpoints used by the tools
//! - [`ClientConfig`] - Base URL and request timeout
//! - [`MarketDataError`] - Error taxonomy

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;

// Re-export all public types from models
pub use models::{
    BookTicker, ExchangeInfo, Kline, OrderBook, PriceLevel, PriceTicker, RateLimitRule,
    SymbolInfo, Ticker24h, Trade, KLINE_FIELDS,
};

// Re-export provider types
pub use provider::binance::{classify_response, BinanceProvider};
pub use provider::{
    encode_symbol_list, present_params, ClientConfig, Endpoint, QueryParam, SpotMarketApi,
    DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, REQUEST_WEIGHT_PER_MINUTE,
};
