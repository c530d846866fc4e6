//! Prices command implementation

use super::table::price_table;
use crate::config::Config;
use crate::ticker::SortKey;
use clap::Args;

#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Reference currency (overrides config)
    #[arg(long)]
    pub currency: Option<String>,

    /// Sort by: price, change or market-cap
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub reverse: bool,

    /// Show the full list instead of the first rows
    #[arg(long)]
    pub all: bool,
}

impl PricesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::build_service(config, self.currency.as_deref(), false)?;
        service.initialize().await;

        if let Some(key) = self.sort {
            let current = service.read().await.sort;
            if current.key != key {
                service.change_sort(key).await;
            }
        }
        if self.reverse {
            // Selecting the active key again flips its direction
            let key = service.read().await.sort.key;
            service.change_sort(key).await;
        }
        if self.all {
            service.toggle_show_all().await;
        }

        let state = service.snapshot().await;
        if let Some(error) = &state.error {
            anyhow::bail!("{}", error);
        }

        let rows = service.visible_prices().await;
        println!("{}", price_table(&state, &rows));
        Ok(())
    }
}
