//! Price service: fetch, retry, cache fallback and auto-refresh

use super::{FetchOutcome, SortConfig, SortKey, TickerState};
use crate::analytics::MarketStats;
use crate::cache::PriceCache;
use crate::config::Config;
use crate::feed::{FetchError, PriceRecord, PriceSource};
use crate::telemetry::{
    increment, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex as AsyncMutex, RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use tokio::time::{sleep, MissedTickBehavior};

/// Runtime settings of a [`PriceService`]
#[derive(Debug, Clone)]
pub struct TickerSettings {
    /// Initial reference currency
    pub currency: String,
    /// Auto-refresh period; zero disables auto-refresh
    pub refresh_interval: Duration,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Constant delay between attempts
    pub retry_delay: Duration,
    /// Rows shown before the full list is requested
    pub initial_display: usize,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            refresh_interval: Duration::from_secs(60),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            initial_display: 10,
        }
    }
}

impl From<&Config> for TickerSettings {
    fn from(config: &Config) -> Self {
        Self {
            currency: config.api.currency.to_lowercase(),
            refresh_interval: config.refresh.interval(),
            max_retries: config.refresh.max_retries,
            retry_delay: config.refresh.retry_delay(),
            initial_display: config.display.initial_count,
        }
    }
}

/// Keeps an up-to-date, locally durable price list
///
/// Constructed once and shared by `Arc`. Every fetch takes a generation
/// number when it starts; only the newest generation may write state or
/// cache, so overlapping refreshes resolve deterministically.
pub struct PriceService {
    source: Arc<dyn PriceSource>,
    cache: PriceCache,
    settings: TickerSettings,
    state: RwLock<TickerState>,
    generation: AtomicU64,
    /// Held for the whole first `initialize`; true once it has completed
    initialized: AsyncMutex<bool>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    changes: watch::Sender<u64>,
}

impl PriceService {
    /// Create a new service
    pub fn new(source: Arc<dyn PriceSource>, cache: PriceCache, settings: TickerSettings) -> Self {
        let (changes, _) = watch::channel(0);
        let state = TickerState::new(settings.currency.to_lowercase());
        Self {
            source,
            cache,
            settings,
            state: RwLock::new(state),
            generation: AtomicU64::new(0),
            initialized: AsyncMutex::new(false),
            refresh_task: Mutex::new(None),
            changes,
        }
    }

    pub fn settings(&self) -> &TickerSettings {
        &self.settings
    }

    /// Show cached data, fetch fresh data, then start auto-refresh
    ///
    /// Concurrent callers wait for the first call to settle; later calls
    /// return the current state without re-fetching.
    pub async fn initialize(self: &Arc<Self>) -> TickerState {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            drop(initialized);
            return self.snapshot().await;
        }

        let currency = self.currency().await;
        if let Some(entry) = self.cache.load(&currency) {
            tracing::info!(
                count = entry.data.len(),
                currency = %currency,
                "Displaying cached prices"
            );
            let mut state = self.state.write().await;
            let sort = state.sort;
            state.prices = entry.data;
            sort.apply(&mut state.prices);
            state.using_cache = true;
            state.last_updated = Some(entry.timestamp);
            drop(state);
            self.notify();
        }

        let outcome = self.fetch_prices().await;
        tracing::info!(?outcome, "Initial price fetch complete");

        self.start_auto_refresh();
        *initialized = true;
        drop(initialized);
        self.snapshot().await
    }

    /// Fetch fresh prices with retry, falling back to the cache
    pub async fn fetch_prices(&self) -> FetchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let currency = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.currency.clone()
        };
        self.notify();

        let started = Instant::now();
        let result = self.fetch_with_retry(&currency).await;
        record_latency(LatencyMetric::PriceFetch, started.elapsed());

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation || state.currency != currency {
            tracing::debug!(generation, "Discarding superseded price fetch");
            increment(CounterMetric::SupersededFetches);
            return FetchOutcome::Superseded;
        }

        state.loading = false;
        let outcome = match result {
            Ok(records) => {
                // Persist in source order, then sort for display
                self.cache.save(&records, &currency);

                let count = records.len();
                let sort = state.sort;
                state.prices = records;
                sort.apply(&mut state.prices);
                state.error = None;
                state.using_cache = false;
                state.last_updated = Some(Utc::now());

                set_gauge(GaugeMetric::TrackedAssets, count as f64);
                tracing::info!(count, currency = %currency, "Prices updated");
                FetchOutcome::Fresh(count)
            }
            Err(e) => match self.cache.load(&currency) {
                Some(entry) => {
                    tracing::warn!(
                        error = %e,
                        age_secs = entry.age(Utc::now()).as_secs(),
                        "Price fetch failed, showing cached prices"
                    );
                    increment(CounterMetric::CacheFallbacks);

                    let sort = state.sort;
                    state.prices = entry.data;
                    sort.apply(&mut state.prices);
                    state.error = None;
                    state.using_cache = true;
                    state.last_updated = Some(entry.timestamp);
                    FetchOutcome::Cached
                }
                None => {
                    tracing::error!(error = %e, "Price fetch failed with no cached prices");
                    state.prices.clear();
                    state.using_cache = false;
                    state.error = Some(format!(
                        "Unable to load cryptocurrency prices ({}). Please try again.",
                        e
                    ));
                    FetchOutcome::Failed
                }
            },
        };
        drop(state);

        self.notify();
        outcome
    }

    /// Attempt loop: one request per attempt, constant delay in between
    async fn fetch_with_retry(&self, currency: &str) -> Result<Vec<PriceRecord>, FetchError> {
        let max_attempts = self.settings.max_retries.saturating_add(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            increment(CounterMetric::FetchAttempts);

            let result = match self.source.fetch_markets(currency).await {
                Ok(records) if records.is_empty() => Err(FetchError::EmptyPayload),
                other => other,
            };

            match result {
                Ok(records) => return Ok(records),
                Err(e) => {
                    increment(CounterMetric::FetchFailures);
                    if attempt >= max_attempts {
                        tracing::error!(error = %e, attempts = attempt, "Price fetch retries exhausted");
                        return Err(e);
                    }
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_attempts,
                        "Price fetch failed, retrying"
                    );
                    sleep(self.settings.retry_delay).await;
                }
            }
        }
    }

    /// Select a sort key and re-sort the current list
    pub async fn change_sort(&self, key: SortKey) -> SortConfig {
        let mut state = self.state.write().await;
        state.sort.select(key);
        let sort = state.sort;
        sort.apply(&mut state.prices);
        drop(state);

        tracing::debug!(key = %sort.key, direction = ?sort.direction, "Sort changed");
        self.notify();
        sort
    }

    /// Switch the reference currency, dropping the cache for the old one
    pub async fn set_currency(&self, currency: &str) -> FetchOutcome {
        let currency = currency.to_lowercase();
        self.cache.clear();
        {
            let mut state = self.state.write().await;
            tracing::info!(from = %state.currency, to = %currency, "Changing currency");
            state.currency = currency;
        }
        self.fetch_prices().await
    }

    /// Fetch now, regardless of any cached data
    pub async fn force_refresh(&self) -> FetchOutcome {
        self.fetch_prices().await
    }

    /// Stop auto-refresh and clear the cache
    ///
    /// Fetches still in flight come back [`FetchOutcome::Superseded`] and
    /// write nothing.
    pub async fn destroy(&self) {
        self.stop_auto_refresh();
        {
            let mut state = self.state.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.cache.clear();
            state.loading = false;
        }
        *self.initialized.lock().await = false;

        self.notify();
        tracing::info!("Price service destroyed");
    }

    /// Toggle between the initial rows and the full list
    pub async fn toggle_show_all(&self) -> bool {
        let mut state = self.state.write().await;
        state.show_all = !state.show_all;
        let show_all = state.show_all;
        drop(state);
        self.notify();
        show_all
    }

    /// Start the periodic refresh task, replacing any running one
    pub fn start_auto_refresh(self: &Arc<Self>) {
        let period = self.settings.refresh_interval;
        if period.is_zero() {
            tracing::debug!("Auto-refresh disabled");
            return;
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(service) = weak.upgrade() else {
                    break;
                };
                tracing::debug!("Auto-refreshing prices");
                service.fetch_prices().await;
            }
        });

        let mut slot = self.refresh_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        tracing::info!(interval_secs = period.as_secs(), "Auto-refresh started");
    }

    /// Stop the periodic refresh task
    pub fn stop_auto_refresh(&self) {
        let mut slot = self.refresh_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    /// Whether a periodic refresh task is running
    pub fn is_auto_refreshing(&self) -> bool {
        let slot = self.refresh_task.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> TickerState {
        self.state.read().await.clone()
    }

    /// Read access to the current state
    pub async fn read(&self) -> RwLockReadGuard<'_, TickerState> {
        self.state.read().await
    }

    /// Rows to render right now
    pub async fn visible_prices(&self) -> Vec<PriceRecord> {
        let state = self.state.read().await;
        state.visible(self.settings.initial_display).to_vec()
    }

    /// Current reference currency
    pub async fn currency(&self) -> String {
        self.state.read().await.currency.clone()
    }

    /// Analytics over the current list
    pub async fn stats(&self) -> MarketStats {
        MarketStats::from_records(&self.state.read().await.prices)
    }

    /// Receiver bumped whenever renderable state changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}

impl Drop for PriceService {
    fn drop(&mut self) {
        self.stop_auto_refresh();
    }
}
