//! Ticker state observed by renderers

use super::SortConfig;
use crate::feed::PriceRecord;
use chrono::{DateTime, Utc};

/// Everything a renderer needs to draw the price list
#[derive(Debug, Clone, Default)]
pub struct TickerState {
    /// Current price list in display order
    pub prices: Vec<PriceRecord>,
    /// Active sort
    pub sort: SortConfig,
    /// A fetch is in flight
    pub loading: bool,
    /// User-facing error message from the last failed fetch cycle
    pub error: Option<String>,
    /// Prices come from the local cache rather than a fresh fetch
    pub using_cache: bool,
    /// Reference currency of `prices`
    pub currency: String,
    /// Capture time of `prices`
    pub last_updated: Option<DateTime<Utc>>,
    /// Show the whole list instead of the initial rows
    pub show_all: bool,
}

impl TickerState {
    /// Create an empty state for `currency`
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Rows to render given the initial display count
    pub fn visible(&self, initial_count: usize) -> &[PriceRecord] {
        if self.show_all {
            &self.prices
        } else {
            &self.prices[..self.prices.len().min(initial_count)]
        }
    }
}

/// Result of one `fetch_prices` cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fresh data applied; holds the record count
    Fresh(usize),
    /// All attempts failed, cached data adopted
    Cached,
    /// All attempts failed with no usable cache
    Failed,
    /// A newer fetch started first; nothing applied
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_respects_initial_count() {
        let mut state = TickerState::new("usd");
        state.prices = (0..15)
            .map(|i| PriceRecord::new(format!("c{}", i), "c", "Coin"))
            .collect();

        assert_eq!(state.visible(10).len(), 10);
        assert_eq!(state.visible(50).len(), 15);

        state.show_all = true;
        assert_eq!(state.visible(10).len(), 15);
    }

    #[test]
    fn test_new_state() {
        let state = TickerState::new("eur");
        assert_eq!(state.currency, "eur");
        assert!(state.prices.is_empty());
        assert!(!state.loading);
        assert!(!state.has_error());
        assert!(!state.using_cache);
    }
}
