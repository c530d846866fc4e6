//! Integration tests for the price service over HTTP and a file cache

use crate::support::{serve, Canned, BITCOIN_ONLY};
use chrono::{TimeDelta, Utc};
use crypto_ticker::cache::{CacheEntry, FileStore, KeyValueStore, PriceCache};
use crypto_ticker::feed::{CoinGeckoClient, CoinGeckoConfig, PriceRecord};
use crypto_ticker::format::format_price;
use crypto_ticker::ticker::{FetchOutcome, PriceService, SortDirection, SortKey, TickerSettings};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_ok;

const KEY: &str = "prices";

struct Harness {
    service: Arc<PriceService>,
    store: Arc<FileStore>,
    _dir: tempfile::TempDir,
}

fn harness(base_url: String, max_retries: u32, ttl: Duration) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let cache = PriceCache::new(store.clone(), KEY, ttl);
    let client = assert_ok!(CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url,
        timeout: Duration::from_secs(2),
        per_page: 50,
    }));
    let settings = TickerSettings {
        currency: "usd".to_string(),
        refresh_interval: Duration::ZERO,
        max_retries,
        retry_delay: Duration::from_millis(5),
        initial_display: 10,
    };

    Harness {
        service: Arc::new(PriceService::new(Arc::new(client), cache, settings)),
        store,
        _dir: dir,
    }
}

fn read_entry(store: &FileStore) -> Option<CacheEntry> {
    store
        .get(KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

fn cached_records() -> Vec<PriceRecord> {
    let mut eth = PriceRecord::new("ethereum", "eth", "Ethereum");
    eth.current_price = Some(dec!(3000));
    vec![eth]
}

#[tokio::test]
async fn test_successful_fetch_is_cached_in_usd() {
    let (base_url, _server) = serve(vec![Canned::ok(BITCOIN_ONLY)]).await;
    let h = harness(base_url, 3, Duration::from_secs(600));

    let state = h.service.initialize().await;
    assert_eq!(state.prices.len(), 1);
    assert!(!state.has_error());
    assert_eq!(
        format_price(state.prices[0].current_price.unwrap(), &state.currency),
        "$65,000"
    );

    let entry = read_entry(&h.store).unwrap();
    assert_eq!(entry.currency, "usd");
    assert_eq!(entry.data.len(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_uses_recent_cache() {
    // Every attempt answers 503
    let (base_url, server) = serve(vec![
        Canned::status(503),
        Canned::status(503),
        Canned::status(503),
    ])
    .await;
    let h = harness(base_url, 2, Duration::from_secs(8 * 60));

    let entry = CacheEntry {
        data: cached_records(),
        timestamp: Utc::now() - TimeDelta::minutes(5),
        currency: "usd".to_string(),
    };
    h.store
        .set(KEY, &serde_json::to_string(&entry).unwrap())
        .unwrap();

    let outcome = h.service.force_refresh().await;
    assert_eq!(outcome, FetchOutcome::Cached);

    let state = h.service.snapshot().await;
    assert_eq!(state.prices, cached_records());
    assert!(state.using_cache);
    assert!(!state.has_error());

    // Initial attempt plus two retries
    assert_eq!(server.await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_unreachable_endpoint_without_cache_reports_error() {
    let (base_url, _server) = serve(vec![Canned::status(500), Canned::status(500)]).await;
    let h = harness(base_url, 1, Duration::from_secs(600));

    let state = h.service.initialize().await;
    assert!(state.prices.is_empty());
    assert!(state.has_error());
    assert!(!state.using_cache);
    assert!(!state.error.unwrap().is_empty());
}

#[tokio::test]
async fn test_currency_change_drops_old_cache() {
    let (base_url, server) = serve(vec![Canned::ok(BITCOIN_ONLY), Canned::status(503)]).await;
    let h = harness(base_url, 0, Duration::from_secs(600));
    let cache = PriceCache::new(h.store.clone(), KEY, Duration::from_secs(600));

    assert_eq!(h.service.force_refresh().await, FetchOutcome::Fresh(1));
    assert!(cache.load("usd").is_some());

    let outcome = h.service.set_currency("eur").await;
    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(cache.load("eur").is_none());
    assert!(cache.load("usd").is_none());

    let lines = server.await.unwrap();
    assert!(lines[1].contains("vs_currency=eur"));
}

#[tokio::test]
async fn test_change_sort_twice_flips_direction() {
    let (base_url, _server) = serve(vec![Canned::ok(BITCOIN_ONLY)]).await;
    let h = harness(base_url, 0, Duration::from_secs(600));
    h.service.initialize().await;

    assert_eq!(
        h.service.change_sort(SortKey::Price).await.direction,
        SortDirection::Desc
    );
    assert_eq!(
        h.service.change_sort(SortKey::Price).await.direction,
        SortDirection::Asc
    );
}
