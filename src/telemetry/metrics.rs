//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full fetch cycle including retries
    PriceFetch,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Assets in the current price list
    TrackedAssets,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Individual HTTP attempts
    FetchAttempts,
    /// Failed HTTP attempts
    FetchFailures,
    /// Cycles that ended on cached data
    CacheFallbacks,
    /// Cycles discarded because a newer one started
    SupersededFetches,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::PriceFetch => "ticker_price_fetch_latency_ms",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::TrackedAssets => "ticker_tracked_assets",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::FetchAttempts => "ticker_fetch_attempts_total",
            CounterMetric::FetchFailures => "ticker_fetch_failures_total",
            CounterMetric::CacheFallbacks => "ticker_cache_fallbacks_total",
            CounterMetric::SupersededFetches => "ticker_superseded_fetches_total",
        }
    }
}

/// Install the Prometheus exporter on `0.0.0.0:port`
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let name = metric.name();
    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!(name).record(value_ms);
    tracing::trace!(metric = name, value_ms, "Recording latency");
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    ::metrics::gauge!(metric.name()).set(value);
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}
