//! Exchange info tool - rate limits, trading rules, and the pair catalogue.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{encode_symbol_list, Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::constants::MAX_SYMBOLS;
use super::{default_response_format, finish, into_tool_output, response_format_schema};
use crate::error::ToolError;
use crate::normalize::{symbol_list, ResponseFormat};
use crate::render;

pub const NAME: &str = "get_exchange_info";
pub const ACTION: &str = "fetching exchange info";

/// Arguments for the get_exchange_info tool.
#[derive(Debug, Deserialize)]
pub struct GetExchangeInfoArgs {
    /// Specific pairs to describe. Absent or empty means the whole catalogue.
    #[serde(default)]
    pub symbols: Option<Vec<String>>,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeInfoRequest {
    pub symbols: Option<Vec<String>>,
    pub format: ResponseFormat,
}

impl GetExchangeInfoArgs {
    pub fn validate(&self) -> Result<ExchangeInfoRequest, ToolError> {
        let symbols = match self.symbols.as_deref() {
            None | Some([]) => None,
            Some(raw) => Some(symbol_list("symbols", raw)?),
        };
        Ok(ExchangeInfoRequest {
            symbols,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl ExchangeInfoRequest {
    fn params(&self) -> Vec<QueryParam> {
        vec![(
            "symbols",
            self.symbols.as_deref().map(encode_symbol_list),
        )]
    }
}

/// Tool to get exchange information.
pub struct GetExchangeInfoTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetExchangeInfoTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetExchangeInfoArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        let filtered = request.symbols.is_some();
        debug!("{}: filtered={}", NAME, filtered);

        let payload = self
            .api
            .fetch(Endpoint::ExchangeInfo, &request.params())
            .await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::exchange_info::markdown(payload, filtered)?,
            ResponseFormat::Json => render::exchange_info::json(payload)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetExchangeInfoTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get exchange information: timezone, server time, rate limits, and trading pair details. Without symbols the full catalogue is summarized; pass symbols to get details for specific pairs.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbols": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxItems": MAX_SYMBOLS,
                    "description": "Optional trading pair symbols to describe, e.g. ['BTCUSDT', 'ETHUSDT']"
                },
                "response_format": response_format_schema()
            },
            "required": []
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetExchangeInfoTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetExchangeInfoArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}
