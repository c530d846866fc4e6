//! Price feed module
//!
//! Fetches ranked market snapshots from a CoinGecko-compatible REST API

mod coingecko;
mod types;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig, COINGECKO_API_URL};
pub use types::{FetchError, PriceRecord};

use async_trait::async_trait;

/// Trait for price source implementations
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the ranked price list denominated in `currency`
    async fn fetch_markets(&self, currency: &str) -> Result<Vec<PriceRecord>, FetchError>;
}
