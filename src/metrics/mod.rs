//! Cache Metrics System
//!
//! Counters describing how a cache is being used. Metrics are reported as a
//! `BTreeMap<String, f64>` so that keys always come out in the same order,
//! which keeps test assertions and log lines reproducible.
//!
//! Recording a metric never changes cache behaviour.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to every cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (hits + misses).
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// New keys stored.
    pub insertions: u64,

    /// Writes that overwrote the value of a key already present.
    pub updates: u64,

    /// Entries dropped to make room for a new key.
    pub evictions: u64,

    /// Entries removed explicitly by the caller.
    pub removals: u64,

    /// Entries currently held.
    pub entries: u64,

    /// Maximum number of entries the cache may hold.
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters for a cache holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that missed.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records an overwrite of an existing entry.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry dropped because the cache was full.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records an entry removed on request.
    pub fn record_removal(&mut self) {
        self.removals += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records that every entry was dropped at once.
    pub fn record_clear(&mut self) {
        self.removals += self.entries;
        self.entries = 0;
    }

    /// Misses so far.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is, between 0.0 and 1.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map with deterministic key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        // Occupancy
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, keys sorted alphabetically.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the eviction algorithm (e.g. `"LRU"`).
    fn algorithm_name(&self) -> &'static str;
}
