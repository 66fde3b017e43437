//! Candlesticks.

use binance_market_data::{Kline, KLINE_FIELDS};
use serde_json::{json, Map, Value};

use super::format::{grouped, percent_change, signed_percent, timestamp, trend_indicator, usd};
use super::{array, envelope, typed};
use crate::error::ToolError;
use crate::tools::constants::MAX_KLINES_SHOWN;
use crate::truncation::{fit_json_records, fit_text, Truncated};

pub fn markdown(payload: Value, symbol: &str, interval: &str) -> Result<Truncated, ToolError> {
    let rows = array(payload, "candles")?;
    let klines: Vec<Kline> = typed(&rows)?;
    Ok(fit_text(render(&klines, symbol, interval)))
}

/// Rows keyed by field name: `{symbol, interval, klines, count}`.
pub fn json(payload: Value, symbol: &str, interval: &str) -> Result<Truncated, ToolError> {
    let rows = array(payload, "candles")?;
    let klines = rows
        .iter()
        .map(named_fields)
        .collect::<Result<Vec<_>, _>>()?;

    let rendered = fit_json_records(&klines, 1, |items, note| {
        envelope(
            json!({
                "symbol": symbol,
                "interval": interval,
                "klines": items,
                "count": items.len(),
            }),
            note,
        )
    })?;
    Ok(rendered)
}

fn named_fields(row: &Value) -> Result<Value, ToolError> {
    let values = row
        .as_array()
        .ok_or_else(|| ToolError::rendering("expected each candle as an array"))?;
    let fields: Map<String, Value> = KLINE_FIELDS
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    Ok(Value::Object(fields))
}

fn render(klines: &[Kline], symbol: &str, interval: &str) -> String {
    let (Some(first), Some(last)) = (klines.first(), klines.last()) else {
        return format!("No kline data found for {symbol} with interval {interval}.");
    };

    let mut lines = vec![format!(
        "# Candlestick Data for {symbol} ({interval} interval)\n"
    )];
    lines.push("| Time | Open | High | Low | Close | Volume | Change % |".to_string());
    lines.push("|------|------|------|-----|-------|--------|----------|".to_string());

    for kline in klines.iter().take(MAX_KLINES_SHOWN) {
        let open = kline.open.unwrap_or_default();
        let close = kline.close.unwrap_or_default();
        let change = percent_change(open, close);
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} {} |",
            timestamp(kline.open_time.unwrap_or(0)),
            usd(open),
            usd(kline.high.unwrap_or_default()),
            usd(kline.low.unwrap_or_default()),
            usd(close),
            grouped(kline.volume.unwrap_or_default(), 2),
            trend_indicator(change),
            signed_percent(change)
        ));
    }

    let first_close = first.close.unwrap_or_default();
    let last_close = last.close.unwrap_or_default();
    let total = klines.len();
    lines.push("\n## Period Summary".to_string());
    lines.push(format!("- **First Close**: {}", usd(first_close)));
    lines.push(format!("- **Last Close**: {}", usd(last_close)));
    lines.push(format!(
        "- **Overall Change**: {}",
        signed_percent(percent_change(first_close, last_close))
    ));
    lines.push(format!(
        "- **Candles Shown**: {} of {total}",
        total.min(MAX_KLINES_SHOWN)
    ));

    if total > MAX_KLINES_SHOWN {
        lines.push(format!(
            "\n*Showing first {MAX_KLINES_SHOWN} of {total} candles. Use start_time/end_time to get specific ranges.*"
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open_time: i64, open: &str, close: &str) -> Value {
        json!([
            open_time, open, "51000.00", "49000.00", close, "1234.5678",
            open_time + 3_599_999, "61728394.00", 1200, "600.1", "30000000.0", "0"
        ])
    }

    #[test]
    fn test_table_and_summary() {
        let payload = json!([
            candle(1704067200000, "50000.00", "50500.00"),
            candle(1704070800000, "50500.00", "49995.00"),
        ]);
        let text = markdown(payload, "BTCUSDT", "1h").unwrap().text;

        assert!(text.starts_with("# Candlestick Data for BTCUSDT (1h interval)\n"));
        let rows = text.lines().filter(|line| line.starts_with("| 2024-")).count();
        assert_eq!(rows, 2);
        assert!(text.contains(
            "| 2024-01-01 00:00:00 UTC | $50,000.00 | $51,000.00 | $49,000.00 | $50,500.00 | 1,234.57 | 📈 +1.00% |"
        ));
        assert!(text.contains("📉 -1.00% |"));
        assert!(text.contains("## Period Summary"));
        assert!(text.contains("- **First Close**: $50,500.00"));
        assert!(text.contains("- **Last Close**: $49,995.00"));
        assert!(text.contains("- **Overall Change**: -1.00%"));
        assert!(text.contains("- **Candles Shown**: 2 of 2"));
        assert!(!text.contains("Showing first"));
    }

    #[test]
    fn test_zero_first_close_yields_zero_change() {
        let payload = json!([
            candle(1704067200000, "0", "0"),
            candle(1704070800000, "10", "20"),
        ]);
        let text = markdown(payload, "NEWUSDT", "1d").unwrap().text;
        assert!(text.contains("- **Overall Change**: +0.00%"));
        assert!(text.contains("➡️ +0.00% |"));
    }

    #[test]
    fn test_extreme_closes_render() {
        let min = "-79228162514264337593543950335";
        let payload = json!([candle(1704067200000, "1", min), candle(1704070800000, "1", min)]);
        let text = markdown(payload, "BTCUSDT", "1h").unwrap().text;

        assert!(text.contains(
            "| $-79,228,162,514,264,337,593,543,950,335.00 | 1,234.57 | ➡️ +0.00% |"
        ));
        assert!(text.contains("- **Overall Change**: +0.00%"));
    }

    #[test]
    fn test_caps_rows_at_fifty() {
        let rows: Vec<Value> = (0..60)
            .map(|i| candle(1704067200000 + i * 3_600_000, "100", "101"))
            .collect();
        let text = markdown(Value::Array(rows), "BTCUSDT", "1h").unwrap().text;
        let shown = text.lines().filter(|line| line.starts_with("| 2024-")).count();
        assert_eq!(shown, 50);
        assert!(text.contains("- **Candles Shown**: 50 of 60"));
        assert!(text.contains("*Showing first 50 of 60 candles."));
    }

    #[test]
    fn test_empty() {
        let text = markdown(json!([]), "BTCUSDT", "1m").unwrap().text;
        assert_eq!(text, "No kline data found for BTCUSDT with interval 1m.");
    }

    #[test]
    fn test_json_names_fields() {
        let payload = json!([candle(1704067200000, "50000.00", "50500.00")]);
        let text = json(payload, "BTCUSDT", "1h").unwrap().text;
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["interval"], "1h");
        assert_eq!(parsed["count"], 1);
        let kline = &parsed["klines"][0];
        assert_eq!(kline["openTime"], 1704067200000_i64);
        assert_eq!(kline["close"], "50500.00");
        assert_eq!(kline["takerBuyQuoteVolume"], "30000000.0");
        assert!(kline.get("ignore").is_none());
    }

    #[test]
    fn test_object_rows_are_rendering_error() {
        let payload = json!([{"open": "1"}]);
        assert!(matches!(
            json(payload, "BTCUSDT", "1h"),
            Err(ToolError::Rendering(_))
        ));
    }
}
