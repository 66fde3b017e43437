//! Market data tools.
//!
//! This module provides tools that implement rig-core's Tool trait:
//! - GetTickerTool: 24h statistics for one or more pairs
//! - SearchSymbolsTool: Find trading pairs by asset or keyword
//! - GetOrderBookTool: Order book depth with spread analysis
//! - GetKlinesTool: Candlesticks with a period summary
//! - GetRecentTradesTool: Recent trades with a buy/sell split
//! - GetExchangeInfoTool: Rate limits and the pair catalogue
//! - GetPriceTool: Latest prices
//! - GetBestPriceTool: Best bid/ask with spread
//!
//! Every tool returns a string. Failures anywhere in a tool's pipeline are
//! turned into an `Error <action>: <message>` diagnostic by
//! [`into_tool_output`], so no error crosses the tool boundary.

pub mod best_price;
pub mod constants;
pub mod exchange_info;
pub mod klines;
pub mod order_book;
pub mod price;
pub mod search_symbols;
pub mod ticker;
pub mod trades;

// Re-export constants
pub use constants::*;

// Re-export tools
pub use best_price::GetBestPriceTool;
pub use exchange_info::GetExchangeInfoTool;
pub use klines::GetKlinesTool;
pub use order_book::GetOrderBookTool;
pub use price::GetPriceTool;
pub use search_symbols::SearchSymbolsTool;
pub use ticker::GetTickerTool;
pub use trades::GetRecentTradesTool;

use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::SpotMarketApi;
use log::{debug, warn};
use rig::{completion::ToolDefinition, tool::Tool};
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::truncation::Truncated;

/// Names of every tool, in registration order.
pub const TOOL_NAMES: [&str; 8] = [
    ticker::NAME,
    search_symbols::NAME,
    order_book::NAME,
    klines::NAME,
    trades::NAME,
    exchange_info::NAME,
    price::NAME,
    best_price::NAME,
];

/// Container for all market data tools, simplifying tool registration.
pub struct ToolSet<A: SpotMarketApi> {
    pub ticker: GetTickerTool<A>,
    pub search_symbols: SearchSymbolsTool<A>,
    pub order_book: GetOrderBookTool<A>,
    pub klines: GetKlinesTool<A>,
    pub trades: GetRecentTradesTool<A>,
    pub exchange_info: GetExchangeInfoTool<A>,
    pub price: GetPriceTool<A>,
    pub best_price: GetBestPriceTool<A>,
}

impl<A: SpotMarketApi + 'static> ToolSet<A> {
    /// Create a new tool set sharing one market data client.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            ticker: GetTickerTool::new(api.clone()),
            search_symbols: SearchSymbolsTool::new(api.clone()),
            order_book: GetOrderBookTool::new(api.clone()),
            klines: GetKlinesTool::new(api.clone()),
            trades: GetRecentTradesTool::new(api.clone()),
            exchange_info: GetExchangeInfoTool::new(api.clone()),
            price: GetPriceTool::new(api.clone()),
            best_price: GetBestPriceTool::new(api),
        }
    }

    /// Definitions for every tool, in [`TOOL_NAMES`] order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ticker::definition(),
            search_symbols::definition(),
            order_book::definition(),
            klines::definition(),
            trades::definition(),
            exchange_info::definition(),
            price::definition(),
            best_price::definition(),
        ]
    }

    /// Invoke a tool by name with JSON arguments. Always returns a string,
    /// including for unknown tools and arguments that do not deserialize.
    pub async fn dispatch(&self, name: &str, args: Value) -> String {
        let args = if args.is_null() { json!({}) } else { args };
        match name {
            ticker::NAME => invoke(&self.ticker, ticker::ACTION, args).await,
            search_symbols::NAME => {
                invoke(&self.search_symbols, search_symbols::ACTION, args).await
            }
            order_book::NAME => invoke(&self.order_book, order_book::ACTION, args).await,
            klines::NAME => invoke(&self.klines, klines::ACTION, args).await,
            trades::NAME => invoke(&self.trades, trades::ACTION, args).await,
            exchange_info::NAME => invoke(&self.exchange_info, exchange_info::ACTION, args).await,
            price::NAME => invoke(&self.price, price::ACTION, args).await,
            best_price::NAME => invoke(&self.best_price, best_price::ACTION, args).await,
            unknown => into_tool_output(
                "dispatching tool",
                Err(ToolError::UnknownTool {
                    name: unknown.to_string(),
                    available: TOOL_NAMES.join(", "),
                }),
            ),
        }
    }
}

async fn invoke<T>(tool: &T, action: &str, args: Value) -> String
where
    T: Tool<Output = String, Error = Infallible>,
{
    let args = match serde_json::from_value::<T::Args>(args) {
        Ok(args) => args,
        Err(e) => {
            return into_tool_output(
                action,
                Err(ToolError::validation(
                    "arguments",
                    format!("Invalid arguments for {}: {e}", T::NAME),
                )),
            )
        }
    };
    match tool.call(args).await {
        Ok(output) => output,
        Err(never) => match never {},
    }
}

/// Collapse a pipeline result into the string handed back to the caller.
pub fn into_tool_output(action: &str, result: Result<String, ToolError>) -> String {
    match result {
        Ok(output) => output,
        Err(e) => {
            warn!("Tool failed while {} [{}]: {}", action, e.code(), first_line(&e));
            format!("Error {action}: {e}")
        }
    }
}

/// Unwrap a rendering, noting when the budget forced a cut.
pub(crate) fn finish(tool: &str, rendered: Truncated) -> String {
    if rendered.was_truncated {
        debug!("{} output truncated to the character budget", tool);
    }
    rendered.text
}

pub(crate) fn default_response_format() -> String {
    "markdown".to_string()
}

/// Schema fragment shared by every tool's `response_format` argument.
pub(crate) fn response_format_schema() -> Value {
    json!({
        "type": "string",
        "enum": RESPONSE_FORMATS,
        "description": "Output format: 'markdown' for human-readable or 'json' for machine-readable",
        "default": "markdown"
    })
}

/// Schema fragment for a required 1..=100 symbol list.
pub(crate) fn symbol_list_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": 1,
        "maxItems": MAX_SYMBOLS,
        "description": description
    })
}

fn first_line(e: &ToolError) -> String {
    e.to_string().lines().next().unwrap_or_default().to_string()
}
