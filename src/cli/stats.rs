//! Stats command implementation

use crate::analytics::{top_gainers, top_losers, MarketStats};
use crate::config::Config;
use crate::format::{format_percent, format_price};
use clap::Args;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Reference currency (overrides config)
    #[arg(long)]
    pub currency: Option<String>,

    /// Number of top gainers and losers to list
    #[arg(long, default_value = "3")]
    pub top: usize,
}

impl StatsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::build_service(config, self.currency.as_deref(), false)?;
        let state = service.initialize().await;
        if let Some(error) = &state.error {
            anyhow::bail!("{}", error);
        }

        let stats = MarketStats::from_records(&state.prices);
        println!("{}", stats.format_table(&state.currency));

        println!("TOP GAINERS");
        for record in top_gainers(&state.prices, self.top) {
            println!(
                "  {:<20} {:>16} {:>9}",
                record.name,
                record
                    .current_price
                    .map(|p| format_price(p, &state.currency))
                    .unwrap_or_else(|| "N/A".to_string()),
                format_percent(record.price_change_percentage_24h)
            );
        }

        println!("TOP LOSERS");
        for record in top_losers(&state.prices, self.top) {
            println!(
                "  {:<20} {:>16} {:>9}",
                record.name,
                record
                    .current_price
                    .map(|p| format_price(p, &state.currency))
                    .unwrap_or_else(|| "N/A".to_string()),
                format_percent(record.price_change_percentage_24h)
            );
        }

        Ok(())
    }
}
