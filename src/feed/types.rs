//! Price feed types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tracked asset's price and market snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Stable asset identifier (e.g., "bitcoin")
    pub id: String,
    /// Ticker symbol (e.g., "btc")
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Icon URL
    #[serde(default)]
    pub image: String,
    /// Current price in the reference currency
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// 24h percentage change (2.5 = +2.5%)
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
    /// Market capitalization
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    /// 24h trading volume
    #[serde(default)]
    pub total_volume: Option<Decimal>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub high_24h: Option<Decimal>,
    #[serde(default)]
    pub low_24h: Option<Decimal>,
    /// Absolute 24h price change
    #[serde(default)]
    pub price_change_24h: Option<Decimal>,
}

impl PriceRecord {
    /// Create a record with only the identifying fields set
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            image: String::new(),
            current_price: None,
            price_change_percentage_24h: None,
            market_cap: None,
            total_volume: None,
            market_cap_rank: None,
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
        }
    }

    /// Drop values that cannot be valid (negative prices or caps)
    pub(crate) fn sanitize(mut self) -> Self {
        let non_negative = |v: Option<Decimal>| v.filter(|d| !d.is_sign_negative());
        self.current_price = non_negative(self.current_price);
        self.market_cap = non_negative(self.market_cap);
        self.total_volume = non_negative(self.total_volume);
        self
    }
}

/// Errors from a single price fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP status
    #[error("Price API error: {status} - {body}")]
    Status { status: u16, body: String },
    /// Payload was not a list of price objects
    #[error("Failed to decode price payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// Payload decoded to an empty list
    #[error("Price API returned an empty payload")]
    EmptyPayload,
}
