//! Recent trades from `/api/v3/trades`.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::numeric::{lenient_bool, lenient_decimal, lenient_integer};

/// One executed trade.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub qty: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quote_qty: Option<Decimal>,

    /// Milliseconds since epoch
    #[serde(default, deserialize_with = "lenient_integer")]
    pub time: Option<i64>,

    /// True when the buyer's order was resting on the book, i.e. the
    /// aggressor was a seller.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_buyer_maker: Option<bool>,
}

impl Trade {
    /// Whether the trade counts toward sell volume. Missing flag counts as a buy.
    pub fn is_sell(&self) -> bool {
        self.is_buyer_maker.unwrap_or(false)
    }
}
