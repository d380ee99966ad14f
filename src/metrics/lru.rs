//! LRU Cache Metrics
//!
//! Metrics for the LRU cache. LRU tracks only the core counters; the wrapper
//! exists so that the reported algorithm name travels with them.

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// LRU metrics (core counters tagged with the `"LRU"` algorithm name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all caches.
    pub core: CoreCacheMetrics,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics for a cache holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
        }
    }

    /// Converts the metrics to a map with deterministic key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
