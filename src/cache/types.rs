//! Cache types

use crate::feed::PriceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Persisted snapshot of a price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached price records in display order
    pub data: Vec<PriceRecord>,
    /// When the data was fetched (epoch milliseconds on disk)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Reference currency the prices are denominated in
    pub currency: String,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    pub fn new(data: Vec<PriceRecord>, currency: impl Into<String>) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
            currency: currency.into(),
        }
    }

    /// Age of the entry at `now`; entries from the future have zero age
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.timestamp).to_std().unwrap_or(Duration::ZERO)
    }

    /// Whether the entry is older than `ttl` at `now`
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) > ttl
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Underlying storage failed
    #[error("Cache storage error: {0}")]
    Io(#[from] std::io::Error),
    /// Entry could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
