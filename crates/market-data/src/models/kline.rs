//! Candlestick rows from `/api/v3/klines`.
//!
//! The provider returns each candle as a positional array:
//! `[openTime, open, high, low, close, volume, closeTime, quoteVolume,
//! trades, takerBuyBaseVolume, takerBuyQuoteVolume, ignore]`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::numeric::{decimal_from_value, integer_from_value};

/// Field names for the positional candle columns, in provider order.
pub const KLINE_FIELDS: [&str; 11] = [
    "openTime",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "closeTime",
    "quoteVolume",
    "trades",
    "takerBuyBaseVolume",
    "takerBuyQuoteVolume",
];

/// One candle. Missing or unparseable columns are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kline {
    pub open_time: Option<i64>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub close_time: Option<i64>,
    pub quote_volume: Option<Decimal>,
    pub trades: Option<i64>,
    pub taker_buy_base_volume: Option<Decimal>,
    pub taker_buy_quote_volume: Option<Decimal>,
}

impl Kline {
    /// Build a candle from one positional row.
    pub fn from_row(row: &[Value]) -> Self {
        let dec = |idx: usize| row.get(idx).and_then(decimal_from_value);
        let int = |idx: usize| row.get(idx).and_then(integer_from_value);
        Self {
            open_time: int(0),
            open: dec(1),
            high: dec(2),
            low: dec(3),
            close: dec(4),
            volume: dec(5),
            close_time: int(6),
            quote_volume: dec(7),
            trades: int(8),
            taker_buy_base_volume: dec(9),
            taker_buy_quote_volume: dec(10),
        }
    }
}

impl<'de> Deserialize<'de> for Kline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self::from_row(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kline_row_parsing() {
        let json = r#"[
            1499040000000,
            "0.01634790",
            "0.80000000",
            "0.01575800",
            "0.01577100",
            "148976.11427815",
            1499644799999,
            "2434.19055334",
            308,
            "1756.87402397",
            "28.46694368",
            "0"
        ]"#;

        let kline: Kline = serde_json::from_str(json).unwrap();
        assert_eq!(kline.open_time, Some(1499040000000));
        assert_eq!(kline.open, Some(dec!(0.0163479)));
        assert_eq!(kline.close, Some(dec!(0.015771)));
        assert_eq!(kline.trades, Some(308));
    }

    #[test]
    fn test_short_row() {
        let kline: Kline = serde_json::from_str(r#"[1499040000000, "1.0"]"#).unwrap();
        assert_eq!(kline.open, Some(dec!(1)));
        assert!(kline.close.is_none());
        assert!(kline.close_time.is_none());
    }
}
