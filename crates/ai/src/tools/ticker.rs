//! Ticker tool - 24h rolling statistics using rig-core Tool trait.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{encode_symbol_list, Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::constants::TICKER_TYPES;
use super::{
    default_response_format, finish, into_tool_output, response_format_schema,
    symbol_list_schema,
};
use crate::error::ToolError;
use crate::normalize::{symbol_list, ResponseFormat, TickerType};
use crate::render;

pub const NAME: &str = "get_ticker";
pub const ACTION: &str = "fetching ticker data";

// ============================================================================
// Tool Arguments
// ============================================================================

/// Arguments for the get_ticker tool.
#[derive(Debug, Deserialize)]
pub struct GetTickerArgs {
    /// Trading pair symbols, e.g. ["BTCUSDT", "ETHUSDT"].
    #[serde(default)]
    pub symbols: Vec<String>,

    /// "FULL" for complete statistics, "MINI" for price and timestamp only.
    #[serde(rename = "type", default = "default_ticker_type")]
    pub ticker_type: String,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

fn default_ticker_type() -> String {
    "FULL".to_string()
}

/// Validated get_ticker request.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRequest {
    pub symbols: Vec<String>,
    pub ticker_type: TickerType,
    pub format: ResponseFormat,
}

impl GetTickerArgs {
    pub fn validate(&self) -> Result<TickerRequest, ToolError> {
        Ok(TickerRequest {
            symbols: symbol_list("symbols", &self.symbols)?,
            ticker_type: TickerType::parse(&self.ticker_type)?,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl TickerRequest {
    fn params(&self) -> Vec<QueryParam> {
        vec![
            ("symbols", Some(encode_symbol_list(&self.symbols))),
            ("type", Some(self.ticker_type.to_string())),
        ]
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to get 24h ticker statistics.
pub struct GetTickerTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetTickerTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetTickerArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!(
            "{}: {} symbol(s), type {}",
            NAME,
            request.symbols.len(),
            request.ticker_type
        );

        let payload = self
            .api
            .fetch(Endpoint::Ticker24h, &request.params())
            .await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::ticker::markdown(payload, request.ticker_type)?,
            ResponseFormat::Json => render::ticker::json(payload, request.ticker_type)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetTickerTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get current price and 24-hour statistics for one or more trading pairs: price change, high/low, volume, weighted average price, and best bid/ask. Use type='MINI' for price and timestamp only. Batch symbols into one call instead of calling once per symbol.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbols": symbol_list_schema("Trading pair symbols, e.g. ['BTCUSDT', 'ETHUSDT']"),
                "type": {
                    "type": "string",
                    "enum": TICKER_TYPES,
                    "description": "FULL: complete statistics, MINI: essential fields only",
                    "default": "FULL"
                },
                "response_format": response_format_schema()
            },
            "required": ["symbols"]
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetTickerTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetTickerArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}
