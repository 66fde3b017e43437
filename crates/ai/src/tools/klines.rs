//! Klines tool - candlestick data for technical analysis.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use binance_market_data::{Endpoint, QueryParam, SpotMarketApi};
use log::debug;

use super::constants::{DEFAULT_RECORD_LIMIT, MAX_RECORD_LIMIT, MIN_RECORD_LIMIT, VALID_INTERVALS};
use super::{default_response_format, finish, into_tool_output, response_format_schema};
use crate::error::ToolError;
use crate::normalize::{interval, record_limit, required_symbol, ResponseFormat};
use crate::render;

pub const NAME: &str = "get_klines";
pub const ACTION: &str = "fetching klines";

// ============================================================================
// Tool Arguments
// ============================================================================

/// Arguments for the get_klines tool.
#[derive(Debug, Deserialize)]
pub struct GetKlinesArgs {
    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub interval: String,

    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Start of the range, milliseconds since epoch.
    #[serde(default)]
    pub start_time: Option<i64>,

    /// End of the range, milliseconds since epoch.
    #[serde(default)]
    pub end_time: Option<i64>,

    #[serde(default = "default_response_format", alias = "format")]
    pub response_format: String,
}

fn default_limit() -> i64 {
    DEFAULT_RECORD_LIMIT
}

/// Validated get_klines request. Time bounds are passed through as given.
#[derive(Debug, Clone, PartialEq)]
pub struct KlinesRequest {
    pub symbol: String,
    pub interval: &'static str,
    pub limit: u32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub format: ResponseFormat,
}

impl GetKlinesArgs {
    pub fn validate(&self) -> Result<KlinesRequest, ToolError> {
        Ok(KlinesRequest {
            symbol: required_symbol("symbol", &self.symbol)?,
            interval: interval(&self.interval)?,
            limit: record_limit(self.limit)?,
            start_time: self.start_time,
            end_time: self.end_time,
            format: ResponseFormat::parse(&self.response_format)?,
        })
    }
}

impl KlinesRequest {
    fn params(&self) -> Vec<QueryParam> {
        vec![
            ("symbol", Some(self.symbol.clone())),
            ("interval", Some(self.interval.to_string())),
            ("limit", Some(self.limit.to_string())),
            ("startTime", self.start_time.map(|t| t.to_string())),
            ("endTime", self.end_time.map(|t| t.to_string())),
        ]
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to get candlestick data.
pub struct GetKlinesTool<A: SpotMarketApi> {
    api: Arc<A>,
}

impl<A: SpotMarketApi> GetKlinesTool<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn run(&self, args: GetKlinesArgs) -> Result<String, ToolError> {
        let request = args.validate()?;
        debug!(
            "{}: {} {} x{}",
            NAME, request.symbol, request.interval, request.limit
        );

        let payload = self.api.fetch(Endpoint::Klines, &request.params()).await?;

        let rendered = match request.format {
            ResponseFormat::Markdown => {
                render::klines::markdown(payload, &request.symbol, request.interval)?
            }
            ResponseFormat::Json => {
                render::klines::json(payload, &request.symbol, request.interval)?
            }
        };
        Ok(finish(NAME, rendered))
    }
}

impl<A: SpotMarketApi> Clone for GetKlinesTool<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Get candlestick (OHLC) data for a trading pair: open, high, low, close, volume and per-candle change, plus a period summary. Markdown shows at most 50 candles; JSON returns all of them. Use start_time/end_time (milliseconds) to select a range.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Trading pair symbol, e.g. 'BTCUSDT'"
                },
                "interval": {
                    "type": "string",
                    "enum": VALID_INTERVALS,
                    "description": "Candle interval"
                },
                "limit": {
                    "type": "integer",
                    "minimum": MIN_RECORD_LIMIT,
                    "maximum": MAX_RECORD_LIMIT,
                    "description": "Number of candles to return",
                    "default": DEFAULT_RECORD_LIMIT
                },
                "start_time": {
                    "type": "integer",
                    "description": "Start time in milliseconds since epoch"
                },
                "end_time": {
                    "type": "integer",
                    "description": "End time in milliseconds since epoch"
                },
                "response_format": response_format_schema()
            },
            "required": ["symbol", "interval"]
        }),
    }
}

impl<A: SpotMarketApi + 'static> Tool for GetKlinesTool<A> {
    const NAME: &'static str = NAME;

    type Error = Infallible;
    type Args = GetKlinesArgs;
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

    fn args(value: serde_json::Value) -> GetKlinesArgs {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_time_bounds_are_stripped() {
        let request = args(json!({"symbol": "btcusdt", "interval": "1h"}))
            .validate()
            .unwrap();
        let params = request.params();
        assert_eq!(params[3], ("startTime", None));
        assert_eq!(
            binance_market_data::present_params(&params),
            vec![("symbol", "BTCUSDT"), ("interval", "1h"), ("limit", "100")]
        );
    }

    #[test]
    fn test_time_bounds_pass_through() {
        let request = args(json!({
            "symbol": "BTCUSDT", "interval": "1d", "start_time": 0, "end_time": 1704067200000_i64
        }))
        .validate()
        .unwrap();
        assert_eq!(request.start_time, Some(0));
        assert_eq!(request.params()[4], ("endTime", Some("1704067200000".to_string())));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(args(json!({"symbol": "BTCUSDT", "interval": "1h", "limit": 0}))
            .validate()
            .is_err());
        assert!(args(json!({"symbol": "BTCUSDT", "interval": "1h", "limit": 1001}))
            .validate()
            .is_err());
    }

    #[tokio::test]
    async fn test_invalid_interval_sends_nothing() {
        let api = Arc::new(MockMarketApi::default());
        let tool = GetKlinesTool::new(api.clone());
        let output = tool
            .call(args(json!({"symbol": "BTCUSDT", "interval": "2h30m"})))
            .await
            .unwrap();
        assert!(output.starts_with("Error fetching klines: Invalid interval '2h30m'"));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_json_output() {
        let api = Arc::new(MockMarketApi::returning(json!([
            [1704067200000_i64, "1", "2", "0.5", "1.5", "10", 1704070799999_i64, "15", 3, "5", "7.5", "0"]
        ])));
        let tool = GetKlinesTool::new(api);
        let output = tool
            .call(args(json!({"symbol": "BTCUSDT", "interval": "1h", "response_format": "json"})))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["symbol"], "BTCUSDT");
        assert_eq!(parsed["klines"][0]["volume"], "10");
    }
}
