//! Exchange info payloads: trading rules, rate limits, and pair metadata.

use serde::Deserialize;
use serde_json::Value;

use super::numeric::{lenient_bool, lenient_integer, lenient_string};

/// Response from `/api/v3/exchangeInfo`.
///
/// `symbols` is kept as raw JSON so structured output can pass the provider's
/// pair objects through untouched; use [`SymbolInfo::from_value`] for the
/// typed view.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub timezone: Option<String>,

    /// Milliseconds since epoch
    #[serde(default, deserialize_with = "lenient_integer")]
    pub server_time: Option<i64>,

    #[serde(default)]
    pub rate_limits: Vec<RateLimitRule>,

    #[serde(default)]
    pub symbols: Vec<Value>,
}

/// One provider rate-limit rule, e.g. `REQUEST_WEIGHT: 6000 per 1 MINUTE`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub rate_limit_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub interval: Option<String>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub interval_num: Option<i64>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub limit: Option<i64>,
}

/// Trading pair metadata from the `symbols` array of exchange info.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,

    /// e.g. "TRADING", "BREAK", "HALT"
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub base_asset: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub quote_asset: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_spot_trading_allowed: Option<bool>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_margin_trading_allowed: Option<bool>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub oco_allowed: Option<bool>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub oto_allowed: Option<bool>,
}

impl SymbolInfo {
    /// Typed view of one raw pair object. Non-object entries yield an empty view.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        // Every field is lenient, so the only failure left is a non-object.
        Self::deserialize(value).unwrap_or_default()
    }

    /// Whether the pair is currently tradable.
    pub fn is_trading(&self) -> bool {
        self.status.as_deref() == Some("TRADING")
    }

    /// Supported trading features in display order.
    pub fn features(&self) -> Vec<&'static str> {
        let mut features = Vec::new();
        if self.is_spot_trading_allowed == Some(true) {
            features.push("Spot");
        }
        if self.is_margin_trading_allowed == Some(true) {
            features.push("Margin");
        }
        if self.oco_allowed == Some(true) {
            features.push("OCO");
        }
        if self.oto_allowed == Some(true) {
            features.push("OTO");
        }
        features
    }
}
