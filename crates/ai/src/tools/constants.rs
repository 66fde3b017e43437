//! Constants for bounded tool outputs and accepted argument values.
//!
//! The accepted-value sets are shared between validation and the error
//! messages that list them, and feed the JSON schemas in each tool definition.

/// Character budget for any rendered tool output.
pub const CHARACTER_LIMIT: usize = 25_000;

/// Maximum number of symbols in one multi-symbol request.
pub const MAX_SYMBOLS: usize = 100;

/// Accepted order book depth levels.
pub const VALID_DEPTH_LIMITS: [i64; 8] = [5, 10, 20, 50, 100, 500, 1000, 5000];

/// Default order book depth.
pub const DEFAULT_DEPTH_LIMIT: i64 = 100;

/// Inclusive bounds for candle and trade counts.
pub const MIN_RECORD_LIMIT: i64 = 1;
pub const MAX_RECORD_LIMIT: i64 = 1000;

/// Default candle and trade count.
pub const DEFAULT_RECORD_LIMIT: i64 = 100;

/// Accepted candle intervals.
pub const VALID_INTERVALS: [&str; 16] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w",
    "1M",
];

/// Accepted ticker verbosity values.
pub const TICKER_TYPES: [&str; 2] = ["FULL", "MINI"];

/// Accepted symbol status filters.
pub const STATUS_FILTERS: [&str; 2] = ["TRADING", "ALL"];

/// Accepted output formats.
pub const RESPONSE_FORMATS: [&str; 2] = ["markdown", "json"];

/// Order book levels shown per side in markdown.
pub const MAX_BOOK_LEVELS_SHOWN: usize = 10;

/// Candles shown in markdown.
pub const MAX_KLINES_SHOWN: usize = 50;

/// Trades shown in markdown.
pub const MAX_TRADES_SHOWN: usize = 50;

/// Above this many pairs, unfiltered exchange info prints a summary only.
pub const MAX_EXCHANGE_SYMBOLS_LISTED: usize = 100;

/// Pairs detailed in unfiltered exchange info markdown and in its JSON fallback.
pub const EXCHANGE_SYMBOLS_PREVIEW: usize = 50;

/// Minimum pairs kept when symbol search JSON is truncated.
pub const MIN_SEARCH_RESULTS_KEPT: usize = 10;
