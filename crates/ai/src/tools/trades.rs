//! Recent trades tool.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::constants::{DEFAULT_RECORD_LIMIT, MAX_RECORD_LIMIT, MIN_RECORD_LIMIT};
use super::{default_response_format, finish, into_tool_output, response_format_schema};
use crate::error::ToolError;
use crate::normalize::{record_limit, required_symbol, ResponseFormat};
use crate::render;

pub const NAME: &str = "get_recent_trades";
pub const ACTION: &str = "fetching recent trades";

/// Arguments for the get_recent_trades tool.
#[derive(Debug, Deserialize)]
pub struct GetRecentTradesArgs {
    #[serde(default)]
    pub symbol: String,

    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

fn default_limit() -> i64 {
    DEFAULT_RECORD_LIMIT
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradesRequest {
    pub symbol: String,
    pub limit: u32,
    pub format: ResponseFormat,
}

impl GetRecentTradesArgs {
    pub fn validate(&self) -> Result<TradesRequest, ToolError> {
        Ok(TradesRequest {
            symbol: required_symbol("symbol", &self.symbol)?,
            limit: record_limit(self.limit)?,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl TradesRequest {
    fn params(&self) -> Vec<QueryParam> {
        vec![
            ("symbol", Some(self.symbol.clone())),
            ("limit", Some(self.limit.to_string())),
        ]
    }
}

/// Tool to get recent trades.
pub struct GetRecentTradesTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetRecentTradesTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetRecentTradesArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!("{}: {} x{}", NAME, request.symbol, request.limit);

        let payload = self.api.fetch(Endpoint::Trades, &request.params()).await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::trades::markdown(payload, &request.symbol)?,
            ResponseFormat::Json => render::trades::json(payload, &request.symbol)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetRecentTradesTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get recent trades for a trading pair: price, quantity, time and side, plus a buy/sell volume summary. Markdown shows at most 50 trades; JSON returns all of them.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Trading pair symbol, e.g. 'BTCUSDT'"
                },
                "limit": {
                    "type": "integer",
                    "minimum": MIN_RECORD_LIMIT,
                    "maximum": MAX_RECORD_LIMIT,
                    "description": "Number of trades to return",
                    "default": DEFAULT_RECORD_LIMIT
                },
                "response_format": response_format_schema()
            },
            "required": ["symbol"]
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetRecentTradesTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetRecentTradesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}
