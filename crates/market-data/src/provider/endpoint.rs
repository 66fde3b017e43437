//! Provider endpoint catalogue and query-parameter handling.

use std::fmt;

/// Public Spot API endpoints used by the tools.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Endpoint {
    /// 24h rolling-window statistics
    Ticker24h,
    /// Trading rules and pair metadata
    ExchangeInfo,
    /// Order book snapshot
    Depth,
    /// Candlesticks
    Klines,
    /// Recent trades
    Trades,
    /// Latest price
    TickerPrice,
    /// Best bid/ask
    BookTicker,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Ticker24h => "/api/v3/ticker/24hr",
            Endpoint::ExchangeInfo => "/api/v3/exchangeInfo",
            Endpoint::Depth => "/api/v3/depth",
            Endpoint::Klines => "/api/v3/klines",
            Endpoint::Trades => "/api/v3/trades",
            Endpoint::TickerPrice => "/api/v3/ticker/price",
            Endpoint::BookTicker => "/api/v3/ticker/bookTicker",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A query parameter whose value may be absent.
pub type QueryParam = (&'static str, Option<String>);

/// Drop absent parameters, keeping the order of the rest.
pub fn present_params(params: &[QueryParam]) -> Vec<(&'static str, &str)> {
    params
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
        .collect()
}

/// Encode a symbol list the way the provider expects multi-symbol filters:
/// a JSON array literal with no whitespace, e.g. `["BTCUSDT","ETHUSDT"]`.
pub fn encode_symbol_list(symbols: &[String]) -> String {
    let quoted: Vec<String> = symbols.iter().map(|s| format!("\"{}\"", s)).collect();
    format!("[{}]", quoted.join(","))
}
