//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache: one `LruSegment` behind a
//! single `parking_lot::Mutex`. This is the multi-threaded counterpart to
//! [`LruCache`](crate::LruCache).
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            ConcurrentLruCache            │
//! │                                          │
//! │   get / put / remove / ... (&self)       │
//! │                  │                       │
//! │             ┌────▼────┐                  │
//! │             │  Mutex  │                  │
//! │             └────┬────┘                  │
//! │           ┌──────▼──────┐                │
//! │           │ LruSegment  │ index + arena  │
//! │           └─────────────┘                │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Recency order is global: every call, reads included, takes the same lock,
//! so the entry evicted is always the least recently used one across the whole
//! cache, exactly as with [`LruCache`](crate::LruCache).
//!
//! # Example
//!
//! ```rust
//! use recency_cache::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<ConcurrentLruCache<String, i32>> =
//!     Arc::new(ConcurrentLruCache::new(10_000).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for j in 0..1000 {
//!             cache.put(format!("key-{}-{}", i, j), j);
//!         }
//!     })
//! }).collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 4000);
//! ```

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::lru::LruSegment;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache guarded by one exclusive lock.
///
/// All methods take `&self`, so the cache can be shared through an `Arc`.
/// Values are returned as clones; use [`get_with`](Self::get_with) to read a
/// value in place while the lock is held.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. Must implement `Clone` for [`get`](Self::get).
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,
    segment: Mutex<LruSegment<K, V, S>>,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a concurrent cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// when `capacity` is below one or does not fit in `usize`.
    pub fn new<C>(capacity: C) -> Result<Self>
    where
        C: TryInto<usize>,
    {
        Ok(Self::init(LruCacheConfig::new(capacity)?, None))
    }

    /// Creates a concurrent cache from a validated configuration.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a concurrent cache with a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            capacity: config.capacity,
            segment: Mutex::new(LruSegment::init(config, hash_builder)),
        }
    }

    /// Maximum number of entries. Fixed at construction, so no lock is taken.
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Maximum number of entries, as a plain `usize`.
    pub fn capacity(&self) -> usize {
        self.cap().get()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Applies `f` to the value for `key` while the lock is held.
    ///
    /// Marks the key most recently used, like [`get`](Self::get), without
    /// cloning the value.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value for `key`.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.segment.lock().get_mut(key).map(f)
    }

    /// Returns a clone of the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lock().peek(key).cloned()
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains(key)
    }

    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns the replaced or evicted pair, as [`LruCache::put`](crate::LruCache::put).
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.segment.lock().put(key, value)
    }

    /// Removes `key`, returning its value if it was cached.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.segment.lock().pop_lru()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }

    /// Snapshot of the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.segment.lock().iter().map(|(k, _)| k.clone()).collect()
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("capacity", &self.capacity)
            .field("segment", &*self.segment.lock())
            .finish()
    }
}
