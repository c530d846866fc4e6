//! CoinGecko API client for market snapshots
//!
//! Fetches the top assets by market cap from the `/coins/markets` endpoint.
//! Each call is a single attempt; retrying and caching belong to the ticker.

use super::{FetchError, PriceRecord, PriceSource};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of assets requested per call
    pub per_page: u32,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            per_page: 50,
        }
    }
}

/// Client for the CoinGecko markets endpoint
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: CoinGeckoConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Markets endpoint URL
    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters for one page of markets in `currency`
    fn query_params(&self, currency: &str) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", currency.to_lowercase()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "24h".to_string()),
        ]
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_markets(&self, currency: &str) -> Result<Vec<PriceRecord>, FetchError> {
        let url = self.markets_url();

        tracing::debug!(url = %url, currency, "Fetching market snapshot");

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&self.query_params(currency))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let records = parse_markets(&body)?;

        tracing::debug!(count = records.len(), "Decoded market snapshot");
        Ok(records)
    }
}

/// Decode a markets payload
///
/// Negative prices/caps are dropped to `None` and repeated ids keep their
/// first (highest ranked) occurrence. An empty list is an error.
fn parse_markets(body: &str) -> Result<Vec<PriceRecord>, FetchError> {
    let raw: Vec<PriceRecord> = serde_json::from_str(body)?;

    let mut seen = HashSet::new();
    let records: Vec<PriceRecord> = raw
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id.clone());
            if !fresh {
                tracing::warn!(id = %r.id, "Dropping duplicate asset id");
            }
            fresh
        })
        .map(PriceRecord::sanitize)
        .collect();

    if records.is_empty() {
        return Err(FetchError::EmptyPayload);
    }

    Ok(records)
}
