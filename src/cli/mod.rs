//! CLI interface for crypto-ticker
//!
//! Provides subcommands for:
//! - `prices`: Fetch and print the price table once
//! - `watch`: Live table with auto-refresh
//! - `stats`: Market overview
//! - `convert`: Convert between assets
//! - `config`: Show effective configuration
//! - `clear-cache`: Delete the local price cache

mod convert;
mod prices;
mod stats;
mod table;
mod watch;

pub use convert::ConvertArgs;
pub use prices::PricesArgs;
pub use stats::StatsArgs;
pub use watch::WatchArgs;

use crate::cache::{FileStore, PriceCache};
use crate::config::Config;
use crate::feed::{CoinGeckoClient, CoinGeckoConfig};
use crate::ticker::{PriceService, TickerSettings};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "crypto-ticker")]
#[command(about = "Cryptocurrency price ticker with local caching and auto-refresh")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and print the price table
    Prices(PricesArgs),
    /// Live price table, refreshed on the configured interval
    Watch(WatchArgs),
    /// Market overview: totals, movers and sentiment
    Stats(StatsArgs),
    /// Convert an amount between assets or the reference currency
    Convert(ConvertArgs),
    /// Show effective configuration
    Config,
    /// Delete the local price cache
    ClearCache,
}

/// Build the price service described by `config`
///
/// `currency` overrides the configured reference currency. One-shot commands
/// pass `auto_refresh = false`.
pub fn build_service(
    config: &Config,
    currency: Option<&str>,
    auto_refresh: bool,
) -> anyhow::Result<Arc<PriceService>> {
    let client = CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url: config.api.base_url.clone(),
        timeout: config.api.timeout(),
        per_page: config.api.per_page,
    })?;

    let cache = PriceCache::new(
        Arc::new(FileStore::new(&config.cache.dir)),
        config.cache.key.clone(),
        config.cache.ttl(),
    );

    let mut settings = TickerSettings::from(config);
    if let Some(currency) = currency {
        settings.currency = currency.to_lowercase();
    }
    if !auto_refresh {
        settings.refresh_interval = Duration::ZERO;
    }

    Ok(Arc::new(PriceService::new(Arc::new(client), cache, settings)))
}

/// Delete the cache file named by `config`
pub fn clear_cache(config: &Config) -> anyhow::Result<()> {
    let cache = PriceCache::new(
        Arc::new(FileStore::new(&config.cache.dir)),
        config.cache.key.clone(),
        config.cache.ttl(),
    );
    cache.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prices_command() {
        let cli = Cli::try_parse_from([
            "crypto-ticker",
            "prices",
            "--currency",
            "eur",
            "--sort",
            "change",
            "--reverse",
        ])
        .unwrap();

        assert_eq!(cli.config, "config.toml");
        match cli.command {
            Commands::Prices(args) => {
                assert_eq!(args.currency.as_deref(), Some("eur"));
                assert_eq!(args.sort, Some(crate::ticker::SortKey::Change24h));
                assert!(args.reverse);
                assert!(!args.all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "crypto-ticker",
            "-c",
            "custom.toml",
            "convert",
            "--from",
            "btc",
            "--to",
            "eth",
            "--amount",
            "1.5",
        ])
        .unwrap();

        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.from, "btc");
                assert_eq!(args.amount, rust_decimal_macros::dec!(1.5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_sort_key() {
        let result = Cli::try_parse_from(["crypto-ticker", "prices", "--sort", "volume"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_clear_cache() {
        let cli = Cli::try_parse_from(["crypto-ticker", "clear-cache"]).unwrap();
        assert!(matches!(cli.command, Commands::ClearCache));
    }

    #[tokio::test]
    async fn test_build_service_applies_overrides() {
        let config = Config::default();
        let service = build_service(&config, Some("GBP"), false).unwrap();
        assert_eq!(service.currency().await, "gbp");
        assert!(service.settings().refresh_interval.is_zero());
    }
}
