//! Ticker payloads: 24h statistics, latest price, and best bid/ask.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::numeric::{lenient_decimal, lenient_integer, lenient_string};

/// One entry from `/api/v3/ticker/24hr`.
///
/// The MINI variant omits the change, weighted-average and bid/ask fields;
/// they simply come back as `None`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub last_price: Option<Decimal>,

    /// Some ticker shapes report `price` instead of `lastPrice`
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_percent: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub weighted_avg_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub open_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub high_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub low_price: Option<Decimal>,

    /// Base asset volume
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Option<Decimal>,

    /// Quote asset volume
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quote_volume: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub bid_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub bid_qty: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ask_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ask_qty: Option<Decimal>,

    /// Statistics window close, milliseconds since epoch
    #[serde(default, deserialize_with = "lenient_integer")]
    pub close_time: Option<i64>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub count: Option<i64>,
}

impl Ticker24h {
    /// Current price, preferring `lastPrice` over `price`.
    pub fn current_price(&self) -> Option<Decimal> {
        self.last_price.or(self.price)
    }
}

/// One entry from `/api/v3/ticker/price`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PriceTicker {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
}

/// One entry from `/api/v3/ticker/bookTicker`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub bid_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub bid_qty: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ask_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ask_qty: Option<Decimal>,
}
