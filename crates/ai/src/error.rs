//! Tool error types.
//!
//! Every pipeline stage returns `Result<_, ToolError>`. The error is collapsed
//! into a diagnostic string only at the dispatch boundary (see
//! [`crate::tools::into_tool_output`]).

use std::fmt;

use binance_market_data::{MarketDataError, REQUEST_WEIGHT_PER_MINUTE};
use thiserror::Error;

use crate::tools::search_symbols::NAME as SEARCH_SYMBOLS;

/// Tool pipeline errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Argument failed validation; no request was sent.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Provider call failed. Display includes remediation guidance.
    #[error("{}", MarketDiagnostic(.0))]
    Market(#[from] MarketDataError),

    /// Provider payload did not have the shape the renderer needs.
    #[error("Unexpected response format: {0}")]
    Rendering(String),

    /// Dispatch was asked for a tool that does not exist.
    #[error("Unknown tool '{name}'. Available tools: {available}")]
    UnknownTool { name: String, available: String },
}

/// The error taxonomy the tool surface reports against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    ValidationFailure,
    InvalidSymbol,
    RateLimited,
    ClientError,
    ServerError,
    Timeout,
    NetworkError,
    RenderingFailure,
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new rendering error.
    pub fn rendering(message: impl Into<String>) -> Self {
        Self::Rendering(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::Validation { .. } | ToolError::UnknownTool { .. } => {
                ErrorKind::ValidationFailure
            }
            ToolError::Rendering(_) => ErrorKind::RenderingFailure,
            ToolError::Market(e) => match e {
                MarketDataError::InvalidSymbol { .. } => ErrorKind::InvalidSymbol,
                MarketDataError::RateLimited { .. } => ErrorKind::RateLimited,
                MarketDataError::ClientError { .. } | MarketDataError::UnexpectedStatus(_) => {
                    ErrorKind::ClientError
                }
                MarketDataError::ServerError { .. } => ErrorKind::ServerError,
                MarketDataError::Timeout { .. } => ErrorKind::Timeout,
                MarketDataError::Network(_) => ErrorKind::NetworkError,
                MarketDataError::InvalidResponse { .. } => ErrorKind::RenderingFailure,
            },
        }
    }
}

/// Error code for programmatic handling.
impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Validation { .. } => "VALIDATION_FAILED",
            ToolError::Market(e) => e.code(),
            ToolError::Rendering(_) => "RENDERING_FAILED",
            ToolError::UnknownTool { .. } => "UNKNOWN_TOOL",
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Rendering(e.to_string())
    }
}

/// Provider error message followed by what the caller should do about it.
struct MarketDiagnostic<'a>(&'a MarketDataError);

impl fmt::Display for MarketDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            MarketDataError::RateLimited { message } => write!(
                f,
                "Rate limit exceeded (HTTP 429)\n\n\
                 Binance rate limit: {REQUEST_WEIGHT_PER_MINUTE} request weight per minute\n\
                 Message: {message}\n\n\
                 Action: Wait 60 seconds before making more requests.\n\
                 Tip: Batch multiple symbols into one request instead of separate requests."
            ),
            MarketDataError::InvalidSymbol { .. } => write!(
                f,
                "{}\n\n\
                 To find valid trading pairs, use the '{SEARCH_SYMBOLS}' tool:\n\
                 - Search by base asset: {SEARCH_SYMBOLS}(base_asset='BTC')\n\
                 - Search by quote asset: {SEARCH_SYMBOLS}(quote_asset='USDT')\n\
                 - Search by keyword: {SEARCH_SYMBOLS}(search_term='DOGE')",
                self.0
            ),
            MarketDataError::ClientError { .. } | MarketDataError::UnexpectedStatus(_) => write!(
                f,
                "{}\n\nPlease check your parameters and try again.",
                self.0
            ),
            MarketDataError::ServerError { .. } => write!(
                f,
                "{}\n\n\
                 This is a temporary issue on Binance's side.\n\
                 Action: Please retry your request in a few moments.",
                self.0
            ),
            MarketDataError::Timeout { .. } => write!(
                f,
                "{}\n\n\
                 This could be due to network issues or high API load.\n\
                 Action: Please retry your request.",
                self.0
            ),
            MarketDataError::Network(_) => write!(
                f,
                "{}\n\nPlease check your internet connection and try again.",
                self.0
            ),
            MarketDataError::InvalidResponse { .. } => write!(f, "{}", self.0),
        }
    }
}
