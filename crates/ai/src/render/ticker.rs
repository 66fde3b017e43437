//! 24-hour ticker statistics.

use binance_market_data::Ticker24h;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use super::format::{
    compact_usd, grouped, timestamp, trend_indicator, usd, usd_or_na, NOT_AVAILABLE,
};
use super::{envelope, record_list, typed};
use crate::error::ToolError;
use crate::normalize::TickerType;
use crate::truncation::{fit_json_records, fit_records, Truncated};

/// Quote assets stripped from a symbol to name its base asset. Longer
/// suffixes first so `FDUSD` wins over a shorter overlap.
const QUOTE_SUFFIXES: [&str; 7] = ["FDUSD", "USDT", "USDC", "BUSD", "BTC", "ETH", "BNB"];

pub fn markdown(payload: Value, ticker_type: TickerType) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let tickers: Vec<Ticker24h> = typed(&records)?;
    Ok(fit_records(&tickers, |chunk| render(chunk, ticker_type)))
}

pub fn json(payload: Value, ticker_type: TickerType) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let rendered = fit_json_records(&records, 1, |items, note| {
        envelope(
            json!({
                "data": items,
                "count": items.len(),
                "type": ticker_type.as_str(),
            }),
            note,
        )
    })?;
    Ok(rendered)
}

/// Base asset of a pair, e.g. `BTCUSDT` -> `BTC`. Unknown quotes leave the
/// symbol as-is.
pub fn base_asset(symbol: &str) -> &str {
    QUOTE_SUFFIXES
        .iter()
        .find_map(|quote| {
            symbol
                .strip_suffix(quote)
                .filter(|base| !base.is_empty())
        })
        .unwrap_or(symbol)
}

fn render(tickers: &[Ticker24h], ticker_type: TickerType) -> String {
    if tickers.is_empty() {
        return "No ticker data found.".to_string();
    }

    let mut lines = vec!["# Binance Ticker Information\n".to_string()];
    for ticker in tickers {
        let symbol = ticker.symbol.as_deref().unwrap_or("Unknown");
        lines.push(format!("## {symbol}\n"));
        lines.push(format!(
            "- **Current Price**: {}",
            usd_or_na(ticker.current_price())
        ));

        if ticker_type == TickerType::Full {
            full_statistics(&mut lines, symbol, ticker);
        }

        if let Some(close_time) = ticker.close_time.filter(|t| *t != 0) {
            lines.push(format!("- **Last Updated**: {}", timestamp(close_time)));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn full_statistics(lines: &mut Vec<String>, symbol: &str, ticker: &Ticker24h) {
    let change = ticker.price_change.unwrap_or_default();
    let change_percent = ticker.price_change_percent.unwrap_or_default();
    lines.push(format!(
        "- **24h Change**: {} {}% ({})",
        trend_indicator(change),
        grouped(change_percent, 2),
        usd(change)
    ));
    lines.push(format!("- **24h High**: {}", usd_or_na(ticker.high_price)));
    lines.push(format!("- **24h Low**: {}", usd_or_na(ticker.low_price)));

    if let Some(volume) = ticker.volume {
        lines.push(format!(
            "- **24h Volume**: {} {}",
            grouped(volume, 2),
            base_asset(symbol)
        ));
    }
    if let Some(quote_volume) = ticker.quote_volume {
        lines.push(format!(
            "- **24h Quote Volume**: {}",
            compact_usd(quote_volume, 2)
        ));
    }
    if let Some(avg) = ticker.weighted_avg_price {
        lines.push(format!("- **Weighted Avg Price**: {}", usd(avg)));
    }
    if let Some(bid) = ticker.bid_price {
        lines.push(format!(
            "- **Best Bid**: {} (Qty: {})",
            usd(bid),
            quantity(ticker.bid_qty)
        ));
    }
    if let Some(ask) = ticker.ask_price {
        lines.push(format!(
            "- **Best Ask**: {} (Qty: {})",
            usd(ask),
            quantity(ticker.ask_qty)
        ));
    }
}

fn quantity(qty: Option<Decimal>) -> String {
    qty.map(|q| grouped(q, 4))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_ticker() -> Value {
        json!({
            "symbol": "BTCUSDT",
            "priceChange": "1250.50000000",
            "priceChangePercent": "2.563",
            "weightedAvgPrice": "49500.12000000",
            "lastPrice": "50000.12000000",
            "bidPrice": "50000.10000000",
            "bidQty": "1.25000000",
            "askPrice": "50000.35000000",
            "askQty": "0.50000000",
            "highPrice": "50500.00000000",
            "lowPrice": "48000.00000000",
            "volume": "12345.67800000",
            "quoteVolume": "612345678.90000000",
            "closeTime": 1704067200000_i64
        })
    }

    #[test]
    fn test_full_report() {
        let text = markdown(btc_ticker(), TickerType::Full).unwrap().text;
        assert!(text.starts_with("# Binance Ticker Information\n"));
        assert!(text.contains("## BTCUSDT"));
        assert!(text.contains("- **Current Price**: $50,000.12"));
        assert!(text.contains("- **24h Change**: 📈 2.56% ($1,250.50)"));
        assert!(text.contains("- **24h High**: $50,500.00"));
        assert!(text.contains("- **24h Volume**: 12,345.68 BTC"));
        assert!(text.contains("- **24h Quote Volume**: $612.35M"));
        assert!(text.contains("- **Best Bid**: $50,000.10 (Qty: 1.2500)"));
        assert!(text.contains("- **Last Updated**: 2024-01-01 00:00:00 UTC"));
    }

    #[test]
    fn test_mini_report_omits_statistics() {
        let text = markdown(btc_ticker(), TickerType::Mini).unwrap().text;
        assert!(text.contains("- **Current Price**: $50,000.12"));
        assert!(!text.contains("24h Change"));
        assert!(!text.contains("Best Bid"));
        assert!(text.contains("Last Updated"));
    }

    #[test]
    fn test_flat_and_missing_values() {
        let payload = json!([{"symbol": "ETHBTC", "priceChange": "0", "lastPrice": "oops"}]);
        let text = markdown(payload, TickerType::Full).unwrap().text;
        assert!(text.contains("- **Current Price**: N/A"));
        assert!(text.contains("➡️"));
        assert!(text.contains("- **24h High**: N/A"));
    }

    #[test]
    fn test_huge_values_render() {
        let huge = "1234567890123456789012345678";
        let payload = json!([{
            "symbol": "BTCUSDT",
            "priceChange": huge,
            "priceChangePercent": "-79228162514264337593543950335",
            "lastPrice": huge,
            "highPrice": huge,
            "volume": huge,
            "quoteVolume": "79228162514264337593543950335",
            "bidPrice": huge,
            "bidQty": huge
        }]);
        let text = markdown(payload, TickerType::Full).unwrap().text;

        assert!(text.contains("- **Current Price**: $1,234,567,890,123,456,789,012,345,678.00"));
        assert!(text.contains("- **24h Volume**: 1,234,567,890,123,456,789,012,345,678.00 BTC"));
        assert!(text.contains("(Qty: 1,234,567,890,123,456,789,012,345,678.0000)"));
        assert!(text.contains("-79,228,162,514,264,337,593,543,950,335.00%"));
    }

    #[test]
    fn test_empty_list() {
        let text = markdown(json!([]), TickerType::Full).unwrap().text;
        assert_eq!(text, "No ticker data found.");
    }

    #[test]
    fn test_base_asset() {
        assert_eq!(base_asset("BTCUSDT"), "BTC");
        assert_eq!(base_asset("ETHBTC"), "ETH");
        assert_eq!(base_asset("DOGEFDUSD"), "DOGE");
        assert_eq!(base_asset("USDT"), "USDT");
        assert_eq!(base_asset("XYZABC"), "XYZABC");
    }

    #[test]
    fn test_json_envelope() {
        let text = json(btc_ticker(), TickerType::Mini).unwrap().text;
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["type"], "MINI");
        assert_eq!(parsed["data"][0]["lastPrice"], "50000.12000000");
    }

    #[test]
    fn test_scalar_payload_is_rendering_error() {
        let err = markdown(json!(42), TickerType::Full).unwrap_err();
        assert!(matches!(err, ToolError::Rendering(_)));
    }
}
