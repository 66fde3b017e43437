//! Order book depth.

use binance_market_data::{OrderBook, PriceLevel};
use serde::Deserialize;
use serde_json::{json, Value};

use super::format::{grouped, usd, Spread, NOT_AVAILABLE};
use super::{envelope, object};
use crate::error::ToolError;
use crate::tools::constants::MAX_BOOK_LEVELS_SHOWN;
use crate::truncation::{fit_json_records, fit_text, Truncated};

pub fn markdown(payload: Value, symbol: &str) -> Result<Truncated, ToolError> {
    object(&payload, "order book")?;
    let book = OrderBook::deserialize(&payload)?;

    let mut lines = vec![format!("# Order Book for {symbol}\n")];
    lines.push(format!(
        "**Last Update ID**: {}\n",
        book.last_update_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    ));

    lines.push("## Top Bids (Buy Orders)".to_string());
    level_table(&mut lines, &book.bids);
    lines.push("\n## Top Asks (Sell Orders)".to_string());
    level_table(&mut lines, &book.asks);

    if let (Some(best_bid), Some(best_ask)) = (book.best_bid(), book.best_ask()) {
        lines.push("\n## Spread Analysis".to_string());
        lines.push(format!("- **Best Bid**: {}", usd(best_bid)));
        lines.push(format!("- **Best Ask**: {}", usd(best_ask)));
        lines.push(format!(
            "- **Spread**: {}",
            Spread::between(best_bid, best_ask).describe()
        ));
    }

    let shown = book.bids.len().max(book.asks.len()).min(MAX_BOOK_LEVELS_SHOWN);
    lines.push(format!(
        "\n*Showing top {shown} levels. Total bids: {}, Total asks: {}*",
        book.bids.len(),
        book.asks.len()
    ));

    Ok(fit_text(lines.join("\n")))
}

/// `{symbol, limit, bidCount, askCount, orderBook}`. Over budget, both sides
/// are cut to the same depth.
pub fn json(payload: Value, symbol: &str, limit: u32) -> Result<Truncated, ToolError> {
    object(&payload, "order book")?;
    let side = |name: &str| -> Vec<Value> {
        payload
            .get(name)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };
    let (bids, asks) = (side("bids"), side("asks"));
    let depth: Vec<usize> = (0..bids.len().max(asks.len())).collect();

    let rendered = fit_json_records(&depth, 1, |kept, note| {
        let levels = kept.len();
        let mut book = payload.clone();
        if note.is_some() {
            book["bids"] = json!(&bids[..levels.min(bids.len())]);
            book["asks"] = json!(&asks[..levels.min(asks.len())]);
        }
        envelope(
            json!({
                "symbol": symbol,
                "limit": limit,
                "bidCount": bids.len(),
                "askCount": asks.len(),
                "orderBook": book,
            }),
            note,
        )
    })?;
    Ok(rendered)
}

fn level_table(lines: &mut Vec<String>, levels: &[PriceLevel]) {
    lines.push("| Price | Quantity | Total |".to_string());
    lines.push("|-------|----------|-------|".to_string());
    for level in levels.iter().take(MAX_BOOK_LEVELS_SHOWN) {
        lines.push(format!(
            "| {} | {} | {} |",
            usd(level.price),
            grouped(level.quantity, 6),
            usd(level.total())
        ));
    }
}
