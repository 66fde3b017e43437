//! Provider payload models
//!
//! Lenient, typed views over the JSON the provider returns. The remote schema
//! is not owned by this crate, so every field is optional and numeric fields
//! accept either JSON strings or JSON numbers:
//! - `numeric` - Lenient decimal/integer parsing shared by all models
//! - `ticker` - 24h statistics, latest price, and top-of-book tickers
//! - `exchange` - Exchange info, trading pair metadata, and rate-limit rules
//! - `depth` - Order book snapshot and price levels
//! - `kline` - Candlestick rows
//! - `trade` - Recent trades

mod depth;
mod exchange;
mod kline;
pub mod numeric;
mod ticker;
mod trade;

pub use depth::{OrderBook, PriceLevel};
pub use exchange::{ExchangeInfo, RateLimitRule, SymbolInfo};
pub use kline::{Kline, KLINE_FIELDS};
pub use ticker::{BookTicker, PriceTicker, Ticker24h};
pub use trade::Trade;
