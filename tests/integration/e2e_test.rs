//! End-to-end configuration tests

use crypto_ticker::cli::build_service;
use crypto_ticker::config::Config;
use std::time::Duration;

#[test]
fn test_config_example_loads() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example")).unwrap();
    assert_eq!(config.api.currency, "usd");
    assert_eq!(config.refresh.max_retries, 3);
    assert_eq!(config.cache.ttl(), Duration::from_secs(600));
}

#[tokio::test]
async fn test_build_service_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!(
        r#"
        [api]
        currency = "EUR"

        [refresh]
        interval_secs = 15
        max_retries = 1

        [cache]
        dir = "{}"
        "#,
        dir.path().display()
    );
    let config: Config = toml::from_str(&toml).unwrap();

    let service = build_service(&config, None, true).unwrap();
    assert_eq!(service.currency().await, "eur");
    assert_eq!(service.settings().refresh_interval, Duration::from_secs(15));
    assert_eq!(service.settings().max_retries, 1);

    let state = service.snapshot().await;
    assert!(state.prices.is_empty());
    assert!(!state.loading);
}
