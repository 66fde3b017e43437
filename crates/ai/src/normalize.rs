//! Request normalization and validation.
//!
//! Each tool's raw arguments pass through these helpers before any network
//! call. Symbols are trimmed and upper-cased; enumerated and numeric fields
//! are checked against the accepted sets in [`crate::tools::constants`], and
//! failures name the offending field and list what is accepted.

use std::fmt;

use serde::Serialize;

use crate::error::ToolError;
use crate::tools::constants::{
    MAX_RECORD_LIMIT, MAX_SYMBOLS, MIN_RECORD_LIMIT, RESPONSE_FORMATS, STATUS_FILTERS,
    TICKER_TYPES, VALID_DEPTH_LIMITS, VALID_INTERVALS,
};

/// Output format selector shared by every tool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResponseFormat {
    /// Human-readable report
    #[default]
    Markdown,
    /// Machine-readable structured data
    Json,
}

impl ResponseFormat {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        match one_of("response_format", raw, &RESPONSE_FORMATS)? {
            "json" => Ok(Self::Json),
            _ => Ok(Self::Markdown),
        }
    }
}

/// Ticker verbosity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TickerType {
    #[default]
    Full,
    Mini,
}

impl TickerType {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        match one_of("type", raw, &TICKER_TYPES)? {
            "MINI" => Ok(Self::Mini),
            _ => Ok(Self::Full),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TickerType::Full => "FULL",
            TickerType::Mini => "MINI",
        }
    }
}

impl fmt::Display for TickerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbol status filter for symbol search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusFilter {
    /// Active pairs only
    #[default]
    Trading,
    All,
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        match one_of("status", raw, &STATUS_FILTERS)? {
            "ALL" => Ok(Self::All),
            _ => Ok(Self::Trading),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Trading => "TRADING",
            StatusFilter::All => "ALL",
        }
    }
}

/// Trim and upper-case a symbol. Idempotent.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize a single required symbol field.
pub fn required_symbol(field: &str, raw: &str) -> Result<String, ToolError> {
    let symbol = normalize_symbol(raw);
    if symbol.is_empty() {
        return Err(ToolError::validation(
            field,
            format!("{field} must be a non-empty trading pair symbol (e.g. 'BTCUSDT')"),
        ));
    }
    Ok(symbol)
}

/// Normalize a symbol list: 1 to [`MAX_SYMBOLS`] non-empty entries.
pub fn symbol_list(field: &str, raw: &[String]) -> Result<Vec<String>, ToolError> {
    if raw.is_empty() {
        return Err(ToolError::validation(
            field,
            format!("{field} must contain at least 1 symbol (e.g. ['BTCUSDT'])"),
        ));
    }
    if raw.len() > MAX_SYMBOLS {
        return Err(ToolError::validation(
            field,
            format!(
                "{field} contains {} symbols; at most {MAX_SYMBOLS} are allowed per request",
                raw.len()
            ),
        ));
    }
    raw.iter()
        .enumerate()
        .map(|(idx, s)| {
            let symbol = normalize_symbol(s);
            if symbol.is_empty() {
                Err(ToolError::validation(
                    field,
                    format!("{field}[{idx}] is empty"),
                ))
            } else {
                Ok(symbol)
            }
        })
        .collect()
}

/// Normalize an optional filter; blank input means "no filter".
pub fn optional_filter(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_symbol).filter(|s| !s.is_empty())
}

/// Check an enumerated value, returning the matching accepted entry.
pub fn one_of<'a>(field: &str, raw: &str, accepted: &[&'a str]) -> Result<&'a str, ToolError> {
    accepted
        .iter()
        .find(|candidate| **candidate == raw)
        .copied()
        .ok_or_else(|| {
            ToolError::validation(
                field,
                format!("Invalid {field} '{raw}'. Valid values: {}", accepted.join(", ")),
            )
        })
}

/// Check an order book depth against the discrete accepted set.
pub fn depth_limit(limit: i64) -> Result<u32, ToolError> {
    if !VALID_DEPTH_LIMITS.contains(&limit) {
        let accepted: Vec<String> = VALID_DEPTH_LIMITS.iter().map(|l| l.to_string()).collect();
        return Err(ToolError::validation(
            "limit",
            format!("Invalid limit {limit}. Valid limits: {}", accepted.join(", ")),
        ));
    }
    Ok(limit as u32)
}

/// Check a candle/trade count against the inclusive range.
pub fn record_limit(limit: i64) -> Result<u32, ToolError> {
    if !(MIN_RECORD_LIMIT..=MAX_RECORD_LIMIT).contains(&limit) {
        return Err(ToolError::validation(
            "limit",
            format!(
                "Invalid limit {limit}. Must be between {MIN_RECORD_LIMIT} and {MAX_RECORD_LIMIT} inclusive"
            ),
        ));
    }
    Ok(limit as u32)
}

/// Check a candle interval.
pub fn interval(raw: &str) -> Result<&'static str, ToolError> {
    one_of("interval", raw, &VALID_INTERVALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol_is_idempotent() {
        for raw in ["btcusdt", " BtcUsdt ", "BTCUSDT", "\tethbtc\n"] {
            let once = normalize_symbol(raw);
            assert_eq!(normalize_symbol(&once), once);
        }
        assert_eq!(normalize_symbol("btcusdt"), normalize_symbol("BTCUSDT"));
        assert_eq!(normalize_symbol("btcusdt"), "BTCUSDT");
    }

    #[test]
    fn test_symbol_list_normalizes_entries() {
        let raw = vec!["btcusdt".to_string(), " ethUSDT ".to_string()];
        assert_eq!(
            symbol_list("symbols", &raw).unwrap(),
            vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()]
        );
    }

    #[test]
    fn test_symbol_list_bounds() {
        assert!(matches!(
            symbol_list("symbols", &[]),
            Err(ToolError::Validation { .. })
        ));

        let hundred: Vec<String> = (0..100).map(|i| format!("SYM{i}")).collect();
        assert_eq!(symbol_list("symbols", &hundred).unwrap().len(), 100);

        let too_many: Vec<String> = (0..101).map(|i| format!("SYM{i}")).collect();
        let err = symbol_list("symbols", &too_many).unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn test_symbol_list_rejects_blank_entry() {
        let raw = vec!["BTCUSDT".to_string(), "  ".to_string()];
        let err = symbol_list("symbols", &raw).unwrap_err();
        assert!(err.to_string().contains("symbols[1] is empty"));
    }

    #[test]
    fn test_required_symbol() {
        assert_eq!(required_symbol("symbol", " bnbusdt").unwrap(), "BNBUSDT");
        assert!(required_symbol("symbol", "   ").is_err());
    }

    #[test]
    fn test_optional_filter() {
        assert_eq!(optional_filter(Some(" btc ")), Some("BTC".to_string()));
        assert_eq!(optional_filter(Some("")), None);
        assert_eq!(optional_filter(None), None);
    }

    #[test]
    fn test_depth_limit_accepted_set() {
        for limit in [5, 10, 20, 50, 100, 500, 1000, 5000] {
            assert_eq!(depth_limit(limit).unwrap(), limit as u32);
        }
    }

    #[test]
    fn test_depth_limit_rejects_others_listing_accepted() {
        for limit in [0, 15, 101, 4999, -5] {
            let err = depth_limit(limit).unwrap_err();
            assert!(err
                .to_string()
                .contains("Valid limits: 5, 10, 20, 50, 100, 500, 1000, 5000"));
        }
    }

    #[test]
    fn test_record_limit_range() {
        assert_eq!(record_limit(1).unwrap(), 1);
        assert_eq!(record_limit(1000).unwrap(), 1000);
        assert!(record_limit(0).is_err());
        assert!(record_limit(1001).is_err());
    }

    #[test]
    fn test_interval() {
        assert_eq!(interval("1h").unwrap(), "1h");
        assert_eq!(interval("1M").unwrap(), "1M");
        let err = interval("2m").unwrap_err();
        assert!(err.to_string().contains("Invalid interval '2m'"));
        assert!(err.to_string().contains("1s, 1m, 3m"));
    }

    #[test]
    fn test_enumerations() {
        assert_eq!(ResponseFormat::parse("json").unwrap(), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse("markdown").unwrap(), ResponseFormat::Markdown);
        assert!(ResponseFormat::parse("xml").is_err());

        assert_eq!(TickerType::parse("MINI").unwrap(), TickerType::Mini);
        assert!(TickerType::parse("mini").is_err());

        assert_eq!(StatusFilter::parse("ALL").unwrap(), StatusFilter::All);
        let err = StatusFilter::parse("BREAK").unwrap_err();
        assert!(err.to_string().contains("Valid values: TRADING, ALL"));
    }
}
