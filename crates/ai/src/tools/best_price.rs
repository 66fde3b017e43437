//! Best price tool - top of book without fetching full depth.

use rig::{completion::ToolDefinition, tool::Tool};
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{Endpoint, SpotMarketApi};
use log::debug;

use super::price::GetPriceArgs;
use super::{finish, into_tool_output, response_format_schema, symbol_list_schema};
use crate::error::ToolError;
use crate::normalize::ResponseFormat;
use crate::render;

pub const NAME: &str = "get_best_price";
pub const ACTION: &str = "fetching best prices";

/// Same arguments as get_price.
pub type GetBestPriceArgs = GetPriceArgs;

/// Tool to get best bid/ask per symbol.
pub struct GetBestPriceTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetBestPriceTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetBestPriceArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!("{}: {} symbol(s)", NAME, request.symbols.len());

        let payload = self
            .api
            .fetch(Endpoint::BookTicker, &request.params())
            .await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => render::book_ticker::markdown(payload)?,
            ResponseFormat::Json => render::book_ticker::json(payload)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetBestPriceTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get the best bid and ask (top of book) with quantities for one or more trading pairs, plus the spread. Cheaper than fetching the full order book.".to_string(),
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

impl<A: SpotMarketApi + 'static> Tool for GetBestPriceTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetBestPriceArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}
