//! Expiring result cache for upstream lookups.
//!
//! A thin wrapper over `moka`'s async cache: every entry expires a fixed
//! time after insertion, and once the entry count exceeds the capacity moka
//! evicts using TinyLFU admission with LRU ordering, which behaves as an
//! approximately least-recently-used policy.

use crate::models::{OwnedGame, PlayerSummary};
use crate::price::PriceQuote;
use moka::future::Cache;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use steamstat_common::{AppId, SteamId};
use steamstat_config::CacheConfig;
use tracing::{debug, instrument};

/// Identity of one cached upstream result.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// Player summary, keyed by the bare Steam ID
    Profile(SteamId),
    /// Owned games list
    Library(SteamId),
    /// Store price of one title
    Price(AppId),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(id) => write!(f, "{id}"),
            Self::Library(id) => write!(f, "games_{id}"),
            Self::Price(app_id) => write!(f, "price_{app_id}"),
        }
    }
}

/// Cached data variants.
#[derive(Debug, Clone)]
pub enum CachedValue {
    /// Player summary
    Profile(Arc<PlayerSummary>),
    /// Owned games list
    Library(Arc<Vec<OwnedGame>>),
    /// Store price
    Price(PriceQuote),
}

/// Cache performance metrics
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

impl CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of lookups served from the cache.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let total = hits + self.misses.load(Ordering::Relaxed) as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Expiring, capacity-bounded cache shared by the Steam fetchers.
pub struct SteamCache {
    cache: Cache<CacheKey, CachedValue>,
    metrics: Arc<CacheMetrics>,
}

impl SteamCache {
    /// Creates a cache with the given time-to-live and capacity.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let metrics = Arc::new(CacheMetrics::default());
        let listener_metrics = Arc::clone(&metrics);

        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .eviction_listener(move |key, _value, cause| {
                if cause.was_evicted() {
                    listener_metrics.record_eviction();
                }
                debug!("Cache entry {} removed: {:?}", key, cause);
            })
            .build();

        Self { cache, metrics }
    }

    /// Creates a cache from the configuration section.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.max_capacity)
    }

    /// Looks up a key; expired entries are reported as misses.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let value = self.cache.get(key).await;
        if value.is_some() {
            debug!("Cache hit");
            self.metrics.record_hit();
        } else {
            debug!("Cache miss");
            self.metrics.record_miss();
        }
        value
    }

    /// Stores a value, starting its time-to-live now.
    #[instrument(skip(self, value), fields(key = %key))]
    pub async fn insert(&self, key: CacheKey, value: CachedValue) {
        debug!("Storing value in cache");
        self.metrics.record_insert();
        self.cache.insert(key, value).await;
    }

    /// Drops every entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Applies pending expirations and evictions.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Counter snapshot for logging.
    pub fn stats(&self) -> HashMap<&'static str, u64> {
        HashMap::from([
            ("hits", self.metrics.hits.load(Ordering::Relaxed)),
            ("misses", self.metrics.misses.load(Ordering::Relaxed)),
            ("inserts", self.metrics.inserts.load(Ordering::Relaxed)),
            ("evictions", self.metrics.evictions.load(Ordering::Relaxed)),
            ("entry_count", self.cache.entry_count()),
        ])
    }
}

impl Default for SteamCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl fmt::Debug for SteamCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamCache")
            .field("entry_count", &self.cache.entry_count())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(formatted: &str) -> CachedValue {
        CachedValue::Price(PriceQuote::Priced {
            formatted: formatted.to_string(),
            currency: Some("RUB".to_string()),
        })
    }

    #[test]
    fn test_cache_key_display() {
        let id = SteamId(76_561_198_064_159_857);
        assert_eq!(CacheKey::Profile(id).to_string(), "76561198064159857");
        assert_eq!(CacheKey::Library(id).to_string(), "games_76561198064159857");
        assert_eq!(CacheKey::Price(AppId(570)).to_string(), "price_570");
    }

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = SteamCache::default();
        let key = CacheKey::Price(AppId(10));

        assert!(cache.get(&key).await.is_none());

        cache.insert(key, price("199 руб.")).await;
        match cache.get(&key).await {
            Some(CachedValue::Price(quote)) => assert_eq!(quote.amount(), Some(199)),
            other => panic!("unexpected cache value: {other:?}"),
        }

        let stats = cache.stats();
        assert_eq!(stats.get("hits"), Some(&1));
        assert_eq!(stats.get("misses"), Some(&1));
        assert!((cache.metrics().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_keys_do_not_collide() {
        let cache = SteamCache::default();
        let id = SteamId(42);

        cache
            .insert(CacheKey::Library(id), CachedValue::Library(Arc::new(vec![])))
            .await;

        assert!(cache.get(&CacheKey::Profile(id)).await.is_none());
        assert!(cache.get(&CacheKey::Library(id)).await.is_some());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        let cache = SteamCache::new(Duration::from_millis(100), 10);
        let key = CacheKey::Price(AppId(20));

        cache.insert(key, price("99 руб.")).await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let cache = SteamCache::new(Duration::from_secs(600), 5);
        for i in 0..50 {
            cache.insert(CacheKey::Price(AppId(i)), price("1 руб.")).await;
        }
        cache.run_pending_tasks().await;

        assert!(cache.entry_count() <= 5);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = SteamCache::default();
        cache.insert(CacheKey::Price(AppId(1)), price("1 руб.")).await;
        cache.invalidate_all();
        assert!(cache.get(&CacheKey::Price(AppId(1))).await.is_none());
    }
}
