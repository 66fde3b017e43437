//! Order book payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::numeric::{decimal_from_value, lenient_integer};

/// Response from `/api/v3/depth`. Bids are sorted best (highest) first, asks
/// best (lowest) first.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub last_update_id: Option<i64>,

    #[serde(default)]
    pub bids: Vec<PriceLevel>,

    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level.price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level.price)
    }
}

/// One `[price, quantity]` level. Unparseable values read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PriceLevel {
    /// Notional value of the level (price × quantity), zero on overflow.
    pub fn total(&self) -> Decimal {
        self.price.checked_mul(self.quantity).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for PriceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = Vec::<Value>::deserialize(deserializer)?;
        let at = |idx: usize| row.get(idx).and_then(decimal_from_value).unwrap_or_default();
        Ok(Self {
            price: at(0),
            quantity: at(1),
        })
    }
}
