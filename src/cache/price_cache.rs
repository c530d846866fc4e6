//! Expiring single-slot price cache

use super::{CacheEntry, CacheError, KeyValueStore};
use crate::feed::PriceRecord;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Store key used when none is configured
pub const DEFAULT_CACHE_KEY: &str = "crypto_prices_cache";

/// Cache of the last successful fetch
///
/// Storage and decoding failures are logged and reported as "no cache".
pub struct PriceCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
}

impl PriceCache {
    /// Create a cache over `store`
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
        }
    }

    /// Load a fresh entry denominated in `currency`
    pub fn load(&self, currency: &str) -> Option<CacheEntry> {
        let entry = match self.read_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Ignoring unreadable price cache");
                return None;
            }
        };

        if !entry.currency.eq_ignore_ascii_case(currency) {
            tracing::debug!(
                cached = %entry.currency,
                requested = currency,
                "Cached prices are in another currency"
            );
            return None;
        }

        let now = Utc::now();
        if entry.is_expired(self.ttl, now) {
            tracing::debug!(age_secs = entry.age(now).as_secs(), "Cached prices expired");
            return None;
        }

        Some(entry)
    }

    /// Persist `data` as the current entry, stamped now; returns whether it was written
    pub fn save(&self, data: &[PriceRecord], currency: &str) -> bool {
        let entry = CacheEntry::new(data.to_vec(), currency);
        match self.write_entry(&entry) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Failed to persist price cache");
                false
            }
        }
    }

    /// Delete the entry
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(error = %e, key = %self.key, "Failed to clear price cache");
        }
    }

    fn read_entry(&self) -> Result<Option<CacheEntry>, CacheError> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_entry(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let raw = serde_json::to_string(entry)?;
        self.store.set(&self.key, &raw)
    }
}
