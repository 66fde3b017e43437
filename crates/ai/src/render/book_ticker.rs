//! Best bid/ask per symbol.

use binance_market_data::BookTicker;
use serde_json::{json, Value};

use super::format::{grouped, usd, Spread};
use super::{envelope, record_list, typed};
use crate::error::ToolError;
use crate::truncation::{fit_json_records, fit_records, Truncated};

pub fn markdown(payload: Value) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let tickers: Vec<BookTicker> = typed(&records)?;
    Ok(fit_records(&tickers, render))
}

pub fn json(payload: Value) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let rendered = fit_json_records(&records, 1, |items, note| {
        envelope(json!({"tickers": items, "count": items.len()}), note)
    })?;
    Ok(rendered)
}

fn render(tickers: &[BookTicker]) -> String {
    if tickers.is_empty() {
        return "No best price data found.".to_string();
    }

    let mut lines = vec!["# Best Bid/Ask Prices\n".to_string()];
    for ticker in tickers {
        let bid = ticker.bid_price.unwrap_or_default();
        let ask = ticker.ask_price.unwrap_or_default();
        lines.push(format!(
            "## {}",
            ticker.symbol.as_deref().unwrap_or("Unknown")
        ));
        lines.push(format!(
            "- **Best Bid**: {} (Qty: {})",
            usd(bid),
            grouped(ticker.bid_qty.unwrap_or_default(), 6)
        ));
        lines.push(format!(
            "- **Best Ask**: {} (Qty: {})",
            usd(ask),
            grouped(ticker.ask_qty.unwrap_or_default(), 6)
        ));
        lines.push(format!("- **Spread**: {}", Spread::between(bid, ask).describe()));
        lines.push(String::new());
    }
    lines.join("\n")
}
