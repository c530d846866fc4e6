use clap::Parser;
use crypto_ticker::cli::{self, Cli, Commands};
use crypto_ticker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::bundled()?
        }
    };

    // Initialize telemetry
    let _telemetry = crypto_ticker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Prices(args) => {
            tracing::debug!("Fetching price table");
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!("Starting live ticker");
            args.execute(&config).await?;
        }
        Commands::Stats(args) => {
            args.execute(&config).await?;
        }
        Commands::Convert(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  API: {} ({}, {} per page, {}s timeout)",
                config.api.base_url,
                config.api.currency,
                config.api.per_page,
                config.api.timeout_secs
            );
            println!(
                "  Refresh: every {}s, {} retries, {}ms retry delay",
                config.refresh.interval_secs,
                config.refresh.max_retries,
                config.refresh.retry_delay_ms
            );
            println!(
                "  Cache: {:?} key={} ttl={}s",
                config.cache.dir, config.cache.key, config.cache.ttl_secs
            );
            println!("  Display: {} rows", config.display.initial_count);
            println!(
                "  Telemetry: level={} format={:?} metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
        Commands::ClearCache => {
            cli::clear_cache(&config)?;
            println!("Price cache cleared");
        }
    }

    Ok(())
}
