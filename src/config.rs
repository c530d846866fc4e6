//! Configuration types for crypto-ticker

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration bundled into the binary, used when no file is found
pub const EXAMPLE_CONFIG: &str = include_str!("../config.toml.example");

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Remote price API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Reference currency prices are denominated in
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of assets requested per fetch
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    crate::feed::COINGECKO_API_URL.to_string()
}
fn default_currency() -> String {
    "usd".to_string()
}
fn default_per_page() -> u32 {
    50
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            currency: default_currency(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Refresh cadence and retry policy
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Auto-refresh period (seconds, 0 disables)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Constant delay between attempts (milliseconds)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_interval_secs() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    2000
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Local cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Entries older than this are ignored (seconds)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Directory holding the cache file
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// Store key of the cache slot
    #[serde(default = "default_cache_key")]
    pub key: String,
}

fn default_ttl_secs() -> u64 {
    600 // 10 minutes
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("./.cache")
}
fn default_cache_key() -> String {
    crate::cache::DEFAULT_CACHE_KEY.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            dir: default_cache_dir(),
            key: default_cache_key(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Rows shown before the full list is requested
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,
}

fn default_initial_count() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Configuration shipped in `config.toml.example`
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(toml::from_str(EXAMPLE_CONFIG)?)
    }
}
