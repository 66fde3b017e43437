//! Price tool - latest price only, the lightest market query.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{encode_symbol_list, Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::{
    default_response_format, finish, into_tool_output, response_format_schema,
    symbol_list_schema,
};
use crate::error::ToolError;
use crate::normalize::{symbol_list, ResponseFormat};
use crate::render;

pub const NAME: &str = "get_price";
pub const ACTION: &str = "fetching prices";

/// Arguments for the get_price and get_best_price tools.
#[derive(Debug, Deserialize)]
pub struct GetPriceArgs {
    #[serde(default)]
    pub symbols: Vec<String>,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

/// Validated symbol-list request.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    pub symbols: Vec<String>,
    pub format: ResponseFormat,
}

impl GetPriceArgs {
    pub fn validate(&self) -> Result<PriceRequest, ToolError> {
        Ok(PriceRequest {
            symbols: symbol_list("symbols", &self.symbols)?,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl PriceRequest {
    pub(crate) fn params(&self) -> Vec<QueryParam> {
        vec![("symbols", Some(encode_symbol_list(&self.symbols)))]
    }
}

/// Tool to get latest prices.
pub struct GetPriceTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetPriceTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetPriceArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!("{}: {} symbol(s)", NAME, request.symbols.len());

        let payload = self
            .api
            .fetch(Endpoint::TickerPrice, &request.params())
            .await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::price::markdown(payload)?,
            ResponseFormat::Json => render::price::json(payload)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetPriceTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get the latest price for one or more trading pairs, without 24h statistics. The fastest way to check prices.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbols": symbol_list_schema("Trading pair symbols, e.g. ['BTCUSDT', 'ETHUSDT']"),
                "response_format": response_format_schema()
            },
            "required": ["symbols"]
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetPriceTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetPriceArgs;
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

    #[tokio::test]
    async fn test_single_symbol_markdown() {
        let api = Arc::new(MockMarketApi::returning(
            json!({"symbol": "BTCUSDT", "price": "50000.12"}),
        ));
        let tool = GetPriceTool::new(api);
        let args = serde_json::from_value(json!({"symbols": ["BTCUSDT"], "response_format": "markdown"}))
            .unwrap();

        let output = tool.call(args).await.unwrap();
        assert!(output.lines().any(|line| line == "- **BTCUSDT**: $50,000.12"));
    }

    #[tokio::test]
    async fn test_too_many_symbols() {
        let api = Arc::new(MockMarketApi::default());
        let tool = GetPriceTool::new(api.clone());
        let symbols: Vec<String> = (0..101).map(|i| format!("C{i}USDT")).collect();
        let args = serde_json::from_value(json!({ "symbols": symbols })).unwrap();

        let output = tool.call(args).await.unwrap();
        assert!(output.starts_with("Error fetching prices: "));
        assert!(output.contains("at most 100"));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_format() {
        let api = Arc::new(MockMarketApi::default());
        let tool = GetPriceTool::new(api);
        let args = serde_json::from_value(json!({"symbols": ["BTCUSDT"], "format": "xml"})).unwrap();

        let output = tool.call(args).await.unwrap();
        assert!(output.contains("Invalid response_format 'xml'. Valid values: markdown, json"));
    }
}
