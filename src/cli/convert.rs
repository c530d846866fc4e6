//! Convert command implementation

use crate::config::Config;
use crate::converter::Converter;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source asset id, symbol or the reference currency
    #[arg(long)]
    pub from: String,

    /// Target asset id, symbol or the reference currency
    #[arg(long)]
    pub to: String,

    /// Amount of the source asset
    #[arg(long, default_value = "1")]
    pub amount: Decimal,

    /// Reference currency (overrides config)
    #[arg(long)]
    pub currency: Option<String>,
}

impl ConvertArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::build_service(config, self.currency.as_deref(), false)?;
        let state = service.initialize().await;
        if let Some(error) = &state.error {
            anyhow::bail!("{}", error);
        }

        let converter = Converter::new(&state.prices, &state.currency);
        let result = converter.convert(&self.from, &self.to, self.amount)?;

        println!(
            "{} {} = {} {}",
            self.amount,
            self.from.to_uppercase(),
            result.round_dp(8).normalize(),
            self.to.to_uppercase()
        );
        if state.using_cache {
            println!("(using cached prices)");
        }
        Ok(())
    }
}
