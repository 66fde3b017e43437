//! Binance AI - market data tools for LLM agents using rig-core.
//!
//! This crate exposes read-only Binance market data as a set of tools an
//! LLM can call. Every tool takes JSON arguments and returns a string:
//! a markdown report, a JSON document, or an `Error <action>: ...`
//! diagnostic. Nothing else crosses the tool boundary.
//!
//! # Architecture
//!
//! - `normalize`: Argument normalization and validation against accepted sets
//! - `tools`: Tool registry, schemas, and dispatch
//! - `render`: Markdown and JSON renderers per data kind
//! - `truncation`: Character budget enforcement for rendered output
//! - `error`: Tool error taxonomy and remediation guidance
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use binance_ai::ToolSet;
//! use binance_market_data::BinanceProvider;
//!
//! let tools = ToolSet::new(Arc::new(BinanceProvider::default()));
//! let report = tools
//!     .dispatch("get_price", serde_json::json!({"symbols": ["BTCUSDT"]}))
//!     .await;
//! println!("{report}");
//! ```

pub mod error;
pub mod normalize;
pub mod render;
pub mod tools;
pub mod truncation;

#[cfg(test)]
pub mod test_env;

// Re-export main types for convenience
pub use error::{ErrorKind, ToolError};
pub use normalize::{ResponseFormat, StatusFilter, TickerType};
pub use tools::{
    into_tool_output, GetBestPriceTool, GetExchangeInfoTool, GetKlinesTool, GetOrderBookTool,
    GetPriceTool, GetRecentTradesTool, GetTickerTool, SearchSymbolsTool, ToolSet, TOOL_NAMES,
};
pub use truncation::Truncated;
