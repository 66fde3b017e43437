//! Recent trades.

use binance_market_data::Trade;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use super::format::{grouped, percent_of, timestamp, usd};
use super::{array, envelope, typed};
use crate::error::ToolError;
use crate::tools::constants::MAX_TRADES_SHOWN;
use crate::truncation::{fit_json_records, fit_text, Truncated};

pub fn markdown(payload: Value, symbol: &str) -> Result<Truncated, ToolError> {
    let records = array(payload, "trades")?;
    let trades: Vec<Trade> = typed(&records)?;
    Ok(fit_text(render(&trades, symbol)))
}

pub fn json(payload: Value, symbol: &str) -> Result<Truncated, ToolError> {
    let records = array(payload, "trades")?;
    let rendered = fit_json_records(&records, 1, |items, note| {
        envelope(
            json!({
                "symbol": symbol,
                "trades": items,
                "count": items.len(),
            }),
            note,
        )
    })?;
    Ok(rendered)
}

/// Base volume split by aggressor side.
#[derive(Debug, Default, PartialEq)]
pub struct VolumeSplit {
    pub buy: Decimal,
    pub sell: Decimal,
}

impl VolumeSplit {
    /// A trade where the buyer was the maker was a sell.
    pub fn of(trades: &[Trade]) -> Self {
        trades.iter().fold(Self::default(), |mut split, trade| {
            let qty = trade.qty.unwrap_or_default();
            if trade.is_sell() {
                split.sell = split.sell.saturating_add(qty);
            } else {
                split.buy = split.buy.saturating_add(qty);
            }
            split
        })
    }

    pub fn total(&self) -> Decimal {
        self.buy.saturating_add(self.sell)
    }

    fn describe(&self, volume: Decimal) -> String {
        let total = self.total();
        if total.is_zero() {
            return "0".to_string();
        }
        format!(
            "{} ({}%)",
            grouped(volume, 6),
            grouped(percent_of(volume, total), 1)
        )
    }
}

fn render(trades: &[Trade], symbol: &str) -> String {
    if trades.is_empty() {
        return format!("No recent trades found for {symbol}.");
    }

    let mut lines = vec![format!("# Recent Trades for {symbol}\n")];
    lines.push("| Time | Price | Quantity | Total | Side |".to_string());
    lines.push("|------|-------|----------|-------|------|".to_string());

    for trade in trades.iter().take(MAX_TRADES_SHOWN) {
        let price = trade.price.unwrap_or_default();
        let qty = trade.qty.unwrap_or_default();
        let side = if trade.is_sell() { "🔴 Sell" } else { "🟢 Buy" };
        lines.push(format!(
            "| {} | {} | {} | {} | {side} |",
            timestamp(trade.time.unwrap_or(0)),
            usd(price),
            grouped(qty, 6),
            usd(price.checked_mul(qty).unwrap_or_default())
        ));
    }

    let split = VolumeSplit::of(trades);
    lines.push("\n## Trading Summary".to_string());
    lines.push(format!("- **Total Trades**: {}", trades.len()));
    lines.push(format!("- **Buy Volume**: {}", split.describe(split.buy)));
    lines.push(format!("- **Sell Volume**: {}", split.describe(split.sell)));

    if trades.len() > MAX_TRADES_SHOWN {
        lines.push(format!(
            "\n*Showing first {MAX_TRADES_SHOWN} of {} trades.*",
            trades.len()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(id: i64, qty: &str, buyer_maker: bool) -> Value {
        json!({
            "id": id,
            "price": "50000.00",
            "qty": qty,
            "quoteQty": "0",
            "time": 1704067200000_i64,
            "isBuyerMaker": buyer_maker,
            "isBestMatch": true
        })
    }

    #[test]
    fn test_table_and_summary() {
        let payload = json!([trade(1, "0.75", false), trade(2, "0.25", true)]);
        let text = markdown(payload, "BTCUSDT").unwrap().text;

        assert!(text.starts_with("# Recent Trades for BTCUSDT\n"));
        assert!(text.contains(
            "| 2024-01-01 00:00:00 UTC | $50,000.00 | 0.750000 | $37,500.00 | 🟢 Buy |"
        ));
        assert!(text.contains("| $12,500.00 | 🔴 Sell |"));
        assert!(text.contains("- **Total Trades**: 2"));
        assert!(text.contains("- **Buy Volume**: 0.750000 (75.0%)"));
        assert!(text.contains("- **Sell Volume**: 0.250000 (25.0%)"));
    }

    #[test]
    fn test_zero_volume_summary() {
        let payload = json!([trade(1, "0", false)]);
        let text = markdown(payload, "BTCUSDT").unwrap().text;
        assert!(text.contains("- **Buy Volume**: 0\n"));
        assert!(text.ends_with("- **Sell Volume**: 0"));
    }

    #[test]
    fn test_volume_split() {
        let trades: Vec<Trade> = typed(&[
            trade(1, "1.5", false),
            trade(2, "2", true),
            trade(3, "0.5", false),
        ])
        .unwrap();
        let split = VolumeSplit::of(&trades);
        assert_eq!(split.buy, dec!(2.0));
        assert_eq!(split.sell, dec!(2));
        assert_eq!(split.total(), dec!(4.0));
    }

    #[test]
    fn test_huge_quantities_render() {
        let payload = json!([
            {"id": 1, "price": "1", "qty": "12345678901234567890123456", "time": 1700000000000_i64, "isBuyerMaker": false},
            {"id": 2, "price": "2", "qty": "79228162514264337593543950335", "time": 1700000000000_i64, "isBuyerMaker": false},
            {"id": 3, "price": "1", "qty": "79228162514264337593543950335", "time": 1700000000000_i64, "isBuyerMaker": true}
        ]);
        let text = markdown(payload, "BTCUSDT").unwrap().text;

        assert!(text.contains(
            "| $1.00 | 12,345,678,901,234,567,890,123,456.000000 | $12,345,678,901,234,567,890,123,456.00 | 🟢 Buy |"
        ));
        // price x qty overflows and falls back to zero
        assert!(text.contains("| 79,228,162,514,264,337,593,543,950,335.000000 | $0.00 | 🟢 Buy |"));
        assert!(text.contains("- **Buy Volume**: 79,228,162,514,264,337,593,543,950,335.000000"));
        assert!(text.contains("- **Total Trades**: 3"));
    }

    #[test]
    fn test_volume_split_saturates() {
        let trades: Vec<Trade> = typed(&[
            trade(1, "79228162514264337593543950335", false),
            trade(2, "79228162514264337593543950335", false),
        ])
        .unwrap();
        let split = VolumeSplit::of(&trades);
        assert_eq!(split.buy, Decimal::MAX);
        assert_eq!(split.total(), Decimal::MAX);
    }

    #[test]
    fn test_caps_rows_at_fifty() {
        let records: Vec<Value> = (0..80).map(|i| trade(i, "1", i % 2 == 0)).collect();
        let text = markdown(Value::Array(records), "ETHUSDT").unwrap().text;
        let rows = text.lines().filter(|line| line.starts_with("| 2024-")).count();
        assert_eq!(rows, 50);
        assert!(text.contains("- **Total Trades**: 80"));
        assert!(text.contains("*Showing first 50 of 80 trades.*"));
    }

    #[test]
    fn test_empty() {
        let text = markdown(json!([]), "BTCUSDT").unwrap().text;
        assert_eq!(text, "No recent trades found for BTCUSDT.");
    }

    #[test]
    fn test_json_envelope() {
        let text = json(json!([trade(7, "1", false)]), "BTCUSDT").unwrap().text;
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["symbol"], "BTCUSDT");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["trades"][0]["id"], 7);
    }
}
