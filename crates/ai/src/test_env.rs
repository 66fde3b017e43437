//! Test doubles for the market data client.

use async_trait::async_trait;
use binance_market_data::{present_params, Endpoint, MarketDataError, QueryParam, SpotMarketApi};
use serde_json::{json, Value};
use std::sync::RwLock;

/// A request as it would have been sent: endpoint plus present parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

/// Mock market data client with a canned response.
pub struct MockMarketApi {
    response: Result<Value, MarketDataError>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl Default for MockMarketApi {
    fn default() -> Self {
        Self::returning(json!([]))
    }
}

impl MockMarketApi {
    pub fn returning(payload: Value) -> Self {
        Self {
            response: Ok(payload),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn failing(error: MarketDataError) -> Self {
        Self {
            response: Err(error),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl SpotMarketApi for MockMarketApi {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[QueryParam],
    ) -> Result<Value, MarketDataError> {
        let params = present_params(params)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.requests
            .write()
            .unwrap()
            .push(RecordedRequest { endpoint, params });
        self.response.clone()
    }
}
