use std::time::Duration;

use anyhow::{bail, Context};
use binance_market_data::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

pub const API_BASE_VAR: &str = "BINANCE_API_BASE";
pub const REQUEST_TIMEOUT_VAR: &str = "BINANCE_REQUEST_TIMEOUT_MS";
pub const LOG_FORMAT_VAR: &str = "BINANCE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup(API_BASE_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(REQUEST_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{REQUEST_TIMEOUT_VAR} must be a number of milliseconds, got '{raw}'"))?;
                if millis == 0 {
                    bail!("{REQUEST_TIMEOUT_VAR} must be greater than zero");
                }
                Duration::from_millis(millis)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            client: ClientConfig::default()
                .with_base_url(base_url)
                .with_timeout(timeout),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (API_BASE_VAR, "http://localhost:9000/"),
            (REQUEST_TIMEOUT_VAR, "2500"),
            (LOG_FORMAT_VAR, "JSON"),
        ])
        .unwrap();
        assert_eq!(config.client.base_url, "http://localhost:9000");
        assert_eq!(config.client.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(config_from(&[(REQUEST_TIMEOUT_VAR, "soon")]).is_err());
        assert!(config_from(&[(REQUEST_TIMEOUT_VAR, "0")]).is_err());
    }
}
