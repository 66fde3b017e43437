//! Symbol search tool - find trading pairs by asset or keyword.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{Endpoint, ExchangeInfo, SpotMarketApi, SymbolInfo};
use log::debug;

use super::constants::STATUS_FILTERS;
use super::{default_response_format, finish, into_tool_output, response_format_schema};
use crate::error::ToolError;
use crate::normalize::{optional_filter, ResponseFormat, StatusFilter};
use crate::render;

pub const NAME: &str = "search_symbols";
pub const ACTION: &str = "searching symbols";

// ============================================================================
// Tool Arguments
// ============================================================================

/// Arguments for the search_symbols tool.
#[derive(Debug, Deserialize)]
pub struct SearchSymbolsArgs {
    /// Exact base asset, e.g. "BTC".
    #[serde(default)]
    pub base_asset: Option<String>,

    /// Exact quote asset, e.g. "USDT".
    #[serde(default)]
    pub quote_asset: Option<String>,

    /// Substring matched against the symbol name.
    #[serde(default)]
    pub search_term: Option<String>,

    /// "TRADING" for active pairs only, or "ALL".
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

fn default_status() -> String {
    "TRADING".to_string()
}

/// Normalized search filters, echoed back in JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolFilters {
    pub base_asset: Option<String>,
    pub quote_asset: Option<String>,
    pub search_term: Option<String>,
    pub status: StatusFilter,
}

impl SymbolFilters {
    pub fn matches(&self, info: &SymbolInfo) -> bool {
        if self.status == StatusFilter::Trading && !info.is_trading() {
            return false;
        }
        if let Some(base) = &self.base_asset {
            if info.base_asset.as_ref() != Some(base) {
                return false;
            }
        }
        if let Some(quote) = &self.quote_asset {
            if info.quote_asset.as_ref() != Some(quote) {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            if !info.symbol.as_deref().unwrap_or_default().contains(term.as_str()) {
                return false;
            }
        }
        true
    }
}

impl SearchSymbolsArgs {
    pub fn validate(&self) -> Result<(SymbolFilters, ResponseFormat), ToolError> {
        let filters = SymbolFilters {
            base_asset: optional_filter(self.base_asset.as_deref()),
            quote_asset: optional_filter(self.quote_asset.as_deref()),
            search_term: optional_filter(self.search_term.as_deref()),
            status: StatusFilter::parse(&self.status)?,
        };
        Ok((filters, ResponseFormat::parse(&self.response_format)?))
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to search trading pairs in the exchange catalogue.
pub struct SearchSymbolsTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> SearchSymbolsTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: SearchSymbolsArgs) -> Result<String, ToolError> {
        let (filters, format) = args.validate()?;

        let payload = self.api.fetch(Endpoint::ExchangeInfo, &[]).await?;
        render::object(&payload, "exchange info")?;
        let info = ExchangeInfo::deserialize(&payload)?;

        let total = info.symbols.len();
        let matched: Vec<Value> = info
            .symbols
            .into_iter()
            .filter(|raw| filters.matches(&SymbolInfo::from_value(raw)))
            .collect();
        debug!("{}: {} of {} pairs matched", NAME, matched.len(), total);

        let rendered = match format {
            ResponseFormat::Markdown => render::symbols::markdown(&matched),
            ResponseFormat::Json => render::symbols::json(&matched, &filters)?,
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for SearchSymbolsTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Search Binance trading pairs by base asset (e.g. 'BTC'), quote asset (e.g. 'USDT'), or a keyword in the symbol name. Returns status, assets, and supported features for each pair. Use this to find exact symbol names before calling other tools.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "base_asset": {
                    "type": "string",
                    "description": "Base asset to filter by, e.g. 'BTC', 'ETH'"
                },
                "quote_asset": {
                    "type": "string",
                    "description": "Quote asset to filter by, e.g. 'USDT', 'BTC'"
                },
                "search_term": {
                    "type": "string",
                    "description": "Keyword to match in symbol names, e.g. 'DOGE'"
                },
                "status": {
                    "type": "string",
                    "enum": STATUS_FILTERS,
                    "description": "TRADING: active pairs only, ALL: include halted pairs",
                    "default": "TRADING"
                },
                "response_format": response_format_schema()
            },
            "required": []
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for SearchSymbolsTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = SearchSymbolsArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        definition()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(into_tool_output(ACTION, self.run(args).await))
    }
}
