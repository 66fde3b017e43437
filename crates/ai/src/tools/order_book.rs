//! Order book tool - depth snapshot with spread analysis.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::constants::{DEFAULT_DEPTH_LIMIT, VALID_DEPTH_LIMITS};
use super::{default_response_format, finish, into_tool_output, response_format_schema};
use crate::error::ToolError;
use crate::normalize::{depth_limit, required_symbol, ResponseFormat};
use crate::render;

pub const NAME: &str = "get_order_book";
pub const ACTION: &str = "fetching order book";

// ============================================================================
// Tool Arguments
// ============================================================================

/// Arguments for the get_order_book tool.
#[derive(Debug, Deserialize)]
pub struct GetOrderBookArgs {
    #[serde(default)]
    pub symbol: String,

    /// Depth: one of 5, 10, 20, 50, 100, 500, 1000, 5000.
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

fn default_limit() -> i64 {
    DEFAULT_DEPTH_LIMIT
}

/// Validated get_order_book request.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookRequest {
    pub symbol: String,
    pub limit: u32,
    pub format: ResponseFormat,
}

impl GetOrderBookArgs {
    pub fn validate(&self) -> Result<OrderBookRequest, ToolError> {
        Ok(OrderBookRequest {
            symbol: required_symbol("symbol", &self.symbol)?,
            limit: depth_limit(self.limit)?,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl OrderBookRequest {
    fn params(&self) -> Vec<QueryParam> {
        vec![
            ("symbol", Some(self.symbol.clone())),
            ("limit", Some(self.limit.to_string())),
        ]
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to get order book depth.
pub struct GetOrderBookTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetOrderBookTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetOrderBookArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!("{}: {} depth {}", NAME, request.symbol, request.limit);

        let payload = self.api.fetch(Endpoint::Depth, &request.params()).await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::order_book::markdown(payload, &request.symbol)?,
            ResponseFormat::Json => {
                render::order_book::json(payload, &request.symbol, request.limit)?
            }
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetOrderBookTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get order book depth (bids and asks) for a trading pair, with totals per level and spread analysis. Markdown shows the top 10 levels per side regardless of limit; JSON returns every level requested.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Trading pair symbol, e.g. 'BTCUSDT'"
                },
                "limit": {
                    "type": "integer",
                    "enum": VALID_DEPTH_LIMITS,
                    "description": "Number of price levels per side",
                    "default": DEFAULT_DEPTH_LIMIT
                },
                "response_format": response_format_schema()
            },
            "required": ["symbol"]
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetOrderBookTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetOrderBookArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::MockMarketApi;
    use serde_json::json;

    #[test]
    fn test_defaults_and_params() {
        let args: GetOrderBookArgs = serde_json::from_value(json!({"symbol": " ethusdt "})).unwrap();
        let request = args.validate().unwrap();
        assert_eq!(request.limit, 100);
        assert_eq!(
            request.params(),
            vec![
                ("symbol", Some("ETHUSDT".to_string())),
                ("limit", Some("100".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_symbol() {
        let args: GetOrderBookArgs = serde_json::from_value(json!({})).unwrap();
        let err = args.validate().unwrap_err();
        assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "symbol"));
    }

    #[tokio::test]
    async fn test_call_renders_spread() {
        let api = Arc::new(MockMarketApi::returning(json!({
            "lastUpdateId": 42,
            "bids": [["100.00", "2"]],
            "asks": [["101.00", "3"]]
        })));
        let tool = GetOrderBookTool::new(api.clone());
        let args = serde_json::from_value(json!({"symbol": "BNBUSDT", "limit": 5})).unwrap();

        let output = tool.call(args).await.unwrap();
        assert!(output.contains("# Order Book for BNBUSDT"));
        assert!(output.contains("- **Spread**: $1.00 (1.000%)"));
        assert_eq!(api.requests()[0].endpoint, Endpoint::Depth);
    }
}
