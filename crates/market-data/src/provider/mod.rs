//! Market data provider abstraction and the Binance implementation.
//!
//! This module contains:
//! - The `SpotMarketApi` trait the tool layer depends on
//! - The endpoint catalogue and query-parameter helpers
//! - Client configuration
//! - `BinanceProvider`, the reqwest-backed implementation

pub mod binance;
mod config;
mod endpoint;
mod traits;

// Re-exports
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, REQUEST_WEIGHT_PER_MINUTE};
pub use endpoint::{encode_symbol_list, present_params, Endpoint, QueryParam};
pub use traits::SpotMarketApi;
