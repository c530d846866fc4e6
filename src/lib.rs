//! crypto-ticker: cryptocurrency price ticker
//!
//! This library provides the core components for:
//! - Market snapshots from a CoinGecko-compatible REST API
//! - Retrying fetches with a constant backoff
//! - An expiring local cache used for instant display and as a fallback
//! - Sorting, auto-refresh and last-writer-safe state updates
//! - Market analytics, formatting and a currency converter
//! - Structured logging and Prometheus metrics

pub mod analytics;
pub mod cache;
pub mod cli;
pub mod config;
pub mod converter;
pub mod feed;
pub mod format;
pub mod telemetry;
pub mod ticker;
