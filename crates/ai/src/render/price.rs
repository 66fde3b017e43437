//! Latest prices.

use binance_market_data::PriceTicker;
use serde_json::{json, Value};

use super::format::usd_or_na;
use super::{envelope, record_list, typed};
use crate::error::ToolError;
use crate::truncation::{fit_json_records, fit_records, Truncated};

pub fn markdown(payload: Value) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let prices: Vec<PriceTicker> = typed(&records)?;
    Ok(fit_records(&prices, render))
}

pub fn json(payload: Value) -> Result<Truncated, ToolError> {
    let records = record_list(payload)?;
    let rendered = fit_json_records(&records, 1, |items, note| {
        envelope(json!({"prices": items, "count": items.len()}), note)
    })?;
    Ok(rendered)
}

fn render(prices: &[PriceTicker]) -> String {
    if prices.is_empty() {
        return "No price data found.".to_string();
    }

    let mut lines = vec!["# Current Prices\n".to_string()];
    lines.extend(prices.iter().map(|ticker| {
        format!(
            "- **{}**: {}",
            ticker.symbol.as_deref().unwrap_or("Unknown"),
            usd_or_na(ticker.price)
        )
    }));
    lines.join("\n")
}
