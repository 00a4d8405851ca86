//! data.gov.in client for daily mandi (wholesale market) prices

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{PriceProvider, ProviderError};

/// Mandi price API client
#[derive(Clone)]
pub struct MandiClient {
    client: Client,
    base_url: String,
    api_key: String,
    limit: u32,
}

/// One market record. Prices arrive as strings or numbers depending on the dataset.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PriceRecord {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub commodity: Option<String>,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub modal_price: Option<serde_json::Value>,
    #[serde(default)]
    pub min_price: Option<serde_json::Value>,
    #[serde(default)]
    pub max_price: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<PriceRecord>,
}

impl MandiClient {
    /// Create a new MandiClient
    pub fn new(
        base_url: String,
        api_key: String,
        limit: u32,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
            limit,
        })
    }

    fn query_params(&self, commodity: &str, state: &str) -> Vec<(&'static str, String)> {
        vec![
            ("api-key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("limit", self.limit.to_string()),
            ("filters[state]", state.to_string()),
            ("filters[commodity]", commodity.to_string()),
        ]
    }
}

#[async_trait]
impl PriceProvider for MandiClient {
    async fn fetch_price_raw(
        &self,
        commodity: &str,
        state: &str,
    ) -> Result<Vec<PriceRecord>, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(commodity, state))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let data: RecordsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("price response: {}", e)))?;

        Ok(data.records)
    }
}
