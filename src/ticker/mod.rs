//! Ticker module
//!
//! Owns the live price list: retrying fetches, cache fallback, sorting and
//! periodic refresh

mod service;
mod sort;
mod state;

pub use service::{PriceService, TickerSettings};
pub use sort::{SortConfig, SortDirection, SortKey};
pub use state::{FetchOutcome, TickerState};
