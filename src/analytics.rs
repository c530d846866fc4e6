//! Market analytics over a price list
//!
//! Pure functions; nothing here holds state between calls.

use crate::feed::PriceRecord;
use crate::format::{format_large_number, format_percent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Coarse market mood derived from the mean 24h change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    VeryBearish,
}

impl Sentiment {
    /// Classify a mean 24h change (in percent); no data is neutral
    pub fn from_average_change(average: Option<Decimal>) -> Self {
        match average {
            Some(avg) if avg > dec!(5) => Sentiment::VeryBullish,
            Some(avg) if avg > dec!(2) => Sentiment::Bullish,
            Some(avg) if avg >= dec!(-2) => Sentiment::Neutral,
            Some(avg) if avg >= dec!(-5) => Sentiment::Bearish,
            Some(_) => Sentiment::VeryBearish,
            None => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::VeryBullish => "Very Bullish",
            Sentiment::Bullish => "Bullish",
            Sentiment::Neutral => "Neutral",
            Sentiment::Bearish => "Bearish",
            Sentiment::VeryBearish => "Very Bearish",
        };
        f.write_str(label)
    }
}

/// Aggregate statistics for a price list
#[derive(Debug, Clone, PartialEq)]
pub struct MarketStats {
    /// Sum of known market caps
    pub total_market_cap: Decimal,
    /// Sum of known 24h volumes
    pub total_volume: Decimal,
    /// Mean 24h change over records that report one
    pub average_change: Option<Decimal>,
    /// Records with a positive 24h change
    pub positive_count: usize,
    /// Records with a negative 24h change
    pub negative_count: usize,
    pub sentiment: Sentiment,
}

impl MarketStats {
    /// Compute statistics for `records`
    pub fn from_records(records: &[PriceRecord]) -> Self {
        let total_market_cap = records.iter().filter_map(|r| r.market_cap).sum();
        let total_volume = records.iter().filter_map(|r| r.total_volume).sum();

        let changes: Vec<Decimal> = records
            .iter()
            .filter_map(|r| r.price_change_percentage_24h)
            .collect();

        let average_change = if changes.is_empty() {
            None
        } else {
            let sum: Decimal = changes.iter().sum();
            Some(sum / Decimal::from(changes.len()))
        };

        Self {
            total_market_cap,
            total_volume,
            average_change,
            positive_count: changes.iter().filter(|c| **c > Decimal::ZERO).count(),
            negative_count: changes.iter().filter(|c| **c < Decimal::ZERO).count(),
            sentiment: Sentiment::from_average_change(average_change),
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self, currency: &str) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               MARKET OVERVIEW
══════════════════════════════════════════════════════
Total Market Cap:  {}
24h Volume:        {}
Avg 24h Change:    {}
Gainers / Losers:  {} / {}
Sentiment:         {}
══════════════════════════════════════════════════════
"#,
            format_large_number(self.total_market_cap, currency),
            format_large_number(self.total_volume, currency),
            format_percent(self.average_change.map(|c| c.round_dp(2))),
            self.positive_count,
            self.negative_count,
            self.sentiment,
        )
    }
}

/// Up to `n` records with the largest 24h gains
pub fn top_gainers(records: &[PriceRecord], n: usize) -> Vec<&PriceRecord> {
    let mut ranked: Vec<&PriceRecord> = records
        .iter()
        .filter(|r| r.price_change_percentage_24h.is_some())
        .collect();
    ranked.sort_by(|a, b| b.price_change_percentage_24h.cmp(&a.price_change_percentage_24h));
    ranked.truncate(n);
    ranked
}

/// Up to `n` records with the largest 24h losses
pub fn top_losers(records: &[PriceRecord], n: usize) -> Vec<&PriceRecord> {
    let mut ranked: Vec<&PriceRecord> = records
        .iter()
        .filter(|r| r.price_change_percentage_24h.is_some())
        .collect();
    ranked.sort_by(|a, b| a.price_change_percentage_24h.cmp(&b.price_change_percentage_24h));
    ranked.truncate(n);
    ranked
}
