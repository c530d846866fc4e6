//! Watch command implementation

use super::table::price_table;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Reference currency (overrides config)
    #[arg(long)]
    pub currency: Option<String>,

    /// Show the full list instead of the first rows
    #[arg(long)]
    pub all: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::build_service(config, self.currency.as_deref(), true)?;
        let mut changes = service.subscribe();

        service.initialize().await;
        if self.all {
            service.toggle_show_all().await;
        }

        loop {
            let state = service.snapshot().await;
            if !state.loading {
                let rows = service.visible_prices().await;
                // Clear screen and move the cursor home
                print!("\x1b[2J\x1b[H");
                match &state.error {
                    Some(error) => println!("{}\n\nRetrying on next refresh...", error),
                    None => println!("{}", price_table(&state, &rows)),
                }
            }

            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping watch");
                    break;
                }
            }
        }

        service.stop_auto_refresh();
        Ok(())
    }
}
