//! Exchange rules, rate limits, and the pair catalogue.

use binance_market_data::{ExchangeInfo, RateLimitRule};
use serde::Deserialize;
use serde_json::{json, Value};

use super::format::{timestamp, NOT_AVAILABLE};
use super::{object, pretty, symbols};
use crate::error::ToolError;
use crate::tools::constants::{EXCHANGE_SYMBOLS_PREVIEW, MAX_EXCHANGE_SYMBOLS_LISTED};
use crate::tools::exchange_info::NAME as GET_EXCHANGE_INFO;
use crate::truncation::{fit_text_with, fits, Truncated};

const NARROW_DOWN: &str = "Use symbols parameter for specific pairs.";

/// `filtered` is whether the caller asked for specific symbols.
pub fn markdown(payload: Value, filtered: bool) -> Result<Truncated, ToolError> {
    object(&payload, "exchange info")?;
    let info = ExchangeInfo::deserialize(&payload)?;

    let mut lines = vec!["# Binance Exchange Information\n".to_string()];
    lines.push("## General Information".to_string());
    lines.push(format!(
        "- **Timezone**: {}",
        info.timezone.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "- **Server Time**: {}\n",
        timestamp(info.server_time.unwrap_or(0))
    ));

    if !info.rate_limits.is_empty() {
        lines.push("## Rate Limits".to_string());
        lines.extend(info.rate_limits.iter().map(rate_limit_line));
        lines.push(String::new());
    }

    let total = info.symbols.len();
    lines.push(format!("## Trading Pairs ({total} total)\n"));
    if filtered {
        lines.push(symbols::render(&info.symbols));
    } else if total > MAX_EXCHANGE_SYMBOLS_LISTED {
        lines.push(format!("*Too many symbols to display ({total} total).*"));
        lines.push("*Use 'symbols' parameter to get details for specific pairs.*".to_string());
        lines.push(format!(
            "\nExample: {GET_EXCHANGE_INFO}(symbols=['BTCUSDT', 'ETHUSDT'])"
        ));
    } else {
        let shown = total.min(EXCHANGE_SYMBOLS_PREVIEW);
        lines.push(symbols::render(&info.symbols[..shown]));
        if total > shown {
            lines.push(format!("\n*Showing first {shown} of {total} symbols.*"));
        }
    }

    Ok(fit_text_with(
        lines.join("\n"),
        &format!("\n\n⚠️ Response truncated. {NARROW_DOWN}"),
    ))
}

/// The raw payload, or its summary fields plus a pair preview when the full
/// document is over budget.
pub fn json(payload: Value) -> Result<Truncated, ToolError> {
    object(&payload, "exchange info")?;
    let full = pretty(&payload)?;
    if fits(&full) {
        return Ok(Truncated::unchanged(full));
    }

    let preview: Vec<Value> = payload
        .get("symbols")
        .and_then(Value::as_array)
        .map(|all| all.iter().take(EXCHANGE_SYMBOLS_PREVIEW).cloned().collect())
        .unwrap_or_default();
    let summary = json!({
        "timezone": payload.get("timezone"),
        "serverTime": payload.get("serverTime"),
        "rateLimits": payload.get("rateLimits").cloned().unwrap_or_else(|| json!([])),
        "symbols": preview,
        "truncated": true,
        "message": format!("Response truncated. {NARROW_DOWN}"),
    });

    Ok(Truncated {
        text: pretty(&summary)?,
        was_truncated: true,
    })
}

fn rate_limit_line(rule: &RateLimitRule) -> String {
    let number = |n: Option<i64>| n.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "- **{}**: {} per {} {}",
        rule.rate_limit_type.as_deref().unwrap_or("Unknown"),
        number(rule.limit),
        number(rule.interval_num),
        rule.interval.as_deref().unwrap_or_default()
    )
}
