//! Trading pair listings, shared by symbol search and exchange info.

use binance_market_data::SymbolInfo;
use serde::Serialize;
use serde_json::{json, Value};

use super::envelope;
use crate::error::ToolError;
use crate::tools::constants::MIN_SEARCH_RESULTS_KEPT;
use crate::truncation::{fit_json_records, fit_records, Truncated};

pub fn markdown(symbols: &[Value]) -> Truncated {
    fit_records(symbols, render)
}

/// Search results with the applied filters echoed back.
pub fn json<F: Serialize>(symbols: &[Value], filters: &F) -> Result<Truncated, ToolError> {
    let filters = serde_json::to_value(filters)?;
    let rendered = fit_json_records(symbols, MIN_SEARCH_RESULTS_KEPT, |items, note| {
        envelope(
            json!({
                "symbols": items,
                "count": items.len(),
                "filters": filters,
            }),
            note,
        )
    })?;
    Ok(rendered)
}

/// One section per pair under a `Found N Trading Pairs` heading.
pub fn render(symbols: &[Value]) -> String {
    if symbols.is_empty() {
        return "No symbols found matching your criteria.".to_string();
    }

    let mut lines = vec![format!("# Found {} Trading Pairs\n", symbols.len())];
    for raw in symbols {
        let info = SymbolInfo::from_value(raw);
        let marker = if info.is_trading() { "✅" } else { "⏸️" };

        lines.push(format!(
            "## {} {marker}",
            info.symbol.as_deref().unwrap_or("Unknown")
        ));
        lines.push(format!(
            "- **Base Asset**: {}",
            info.base_asset.as_deref().unwrap_or_default()
        ));
        lines.push(format!(
            "- **Quote Asset**: {}",
            info.quote_asset.as_deref().unwrap_or_default()
        ));
        lines.push(format!(
            "- **Status**: {}",
            info.status.as_deref().unwrap_or("Unknown")
        ));

        let features = info.features();
        if !features.is_empty() {
            lines.push(format!("- **Supported**: {}", features.join(", ")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}
