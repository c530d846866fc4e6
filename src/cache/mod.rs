//! Local price cache
//!
//! A single-slot, expiring snapshot of the last successful fetch, persisted
//! through a string key-value store.

mod price_cache;
mod store;
mod types;

pub use price_cache::{PriceCache, DEFAULT_CACHE_KEY};
pub use store::{FileStore, MemoryStore};
pub use types::{CacheEntry, CacheError};

/// Persistent string key-value storage
///
/// Values are always replaced or removed whole.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}
