//! Least Recently Used (LRU) Cache Implementation
//!
//! A bounded cache with O(1) `get`, `put` and eviction. When a new key arrives
//! and the cache is full, the entry that was read or written longest ago is
//! dropped to make room.
//!
//! # Structure
//!
//! ```text
//!   index: HashMap<K, slot>          arena: Vec<slot>
//!   ┌─────────┬──────┐     ┌──────┬──────┬──────┬──────┬──────┐
//!   │ "apple" │  3   │     │ HEAD │ TAIL │  b   │  a   │ free │
//!   │ "banana"│  2   │     │  0   │  1   │  2   │  3   │  4   │
//!   └─────────┴──────┘     └──────┴──────┴──────┴──────┴──────┘
//!
//!   recency:  HEAD ⇄ a ⇄ b ⇄ TAIL
//!             (MRU)          (LRU, next to evict)
//! ```
//!
//! The index maps each key to a slot in the arena. The slots form a doubly
//! linked list by index, bracketed by two sentinel slots that are never
//! evicted. A hit moves the slot behind `HEAD`; eviction takes the slot in
//! front of `TAIL`. Freed slots are recycled, so the arena never holds more
//! than `capacity + 2` slots.
//!
//! # Performance Characteristics
//!
//! - Get: O(1)
//! - Put: O(1)
//! - Remove: O(1)
//! - Clear: O(n)
//!
//! # Thread Safety
//!
//! `get` reorders entries and therefore needs `&mut self`. For shared access
//! wrap the cache in a single exclusive lock, or enable the `concurrent`
//! feature and use [`ConcurrentLruCache`](crate::ConcurrentLruCache).

use crate::arena::{self, Arena};
use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use log::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LRU segment holding the index, the arena and the counters.
///
/// Shared between `LruCache` (single-threaded) and `ConcurrentLruCache`
/// (behind a mutex), so the algorithm lives in one place.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: Arena<(K, V)>,
    map: HashMap<K, usize, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn init(config: LruCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        debug!("creating LRU cache with capacity {}", cap);
        LruSegment {
            config,
            list: Arena::new(cap),
            map: HashMap::with_capacity_and_hasher(
                cap.min(arena::PREALLOCATE_LIMIT),
                hash_builder,
            ),
            metrics: LruCacheMetrics::new(cap as u64),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.list.slot_count()
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.list.move_to_front(idx);
                self.metrics.core.record_hit();
                self.list.get(idx).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.list.move_to_front(idx);
                self.metrics.core.record_hit();
                self.list.get_mut(idx).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = *self.map.get(key)?;
        self.list.get(idx).map(|(_, v)| v)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn peek_mru(&self) -> Option<(&K, &V)> {
        let idx = self.list.front()?;
        self.list.get(idx).map(|(k, v)| (k, v))
    }

    pub(crate) fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.list.back()?;
        self.list.get(idx).map(|(k, v)| (k, v))
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(&idx) = self.map.get(&key) {
            self.list.move_to_front(idx);
            self.metrics.core.record_update();
            return self.list.replace(idx, (key, value));
        }

        let evicted = if self.map.len() >= self.cap().get() {
            self.evict()
        } else {
            None
        };

        let idx = self.list.push_front((key.clone(), value));
        self.map.insert(key, idx);
        self.metrics.core.record_insertion();

        debug_assert_eq!(self.map.len(), self.list.len());
        debug_assert!(self.list.slot_count() <= self.cap().get().saturating_add(2));
        evicted
    }

    /// Drops the least recently used entry to make room for a new key.
    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        trace!(
            "evicted least recently used entry ({}/{} entries)",
            self.map.len(),
            self.cap()
        );
        Some((key, value))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.map.remove(key)?;
        let (_, value) = self.list.remove(idx)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    pub(crate) fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        self.metrics.core.record_removal();
        Some((key, value))
    }

    pub(crate) fn clear(&mut self) {
        debug!("clearing LRU cache ({} entries)", self.map.len());
        self.metrics.core.record_clear();
        self.map.clear();
        self.list.clear();
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<K, V, S> fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("list", &self.list)
            .finish()
    }
}

/// A bounded Least Recently Used (LRU) cache.
///
/// Capacity is fixed at construction and is at least one. `get` and `put`
/// both mark the key as most recently used; inserting a new key into a full
/// cache evicts exactly one entry, the least recently used one.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
///
/// // A cache that cannot hold anything is rejected up front
/// assert!(LruCache::<&str, i32>::new(0).is_err());
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// when `capacity` is below one or does not fit in `usize`.
    pub fn new<C>(capacity: C) -> Result<LruCache<K, V, DefaultHashBuilder>>
    where
        C: TryInto<usize>,
    {
        Ok(LruCache::init(LruCacheConfig::new(capacity)?, None))
    }

    /// Creates a cache from a validated configuration.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache with a custom hash builder.
    pub fn with_hasher<C>(capacity: C, hash_builder: S) -> Result<Self>
    where
        C: TryInto<usize>,
    {
        Ok(Self::init_with_hasher(
            LruCacheConfig::new(capacity)?,
            hash_builder,
        ))
    }

    /// Creates a cache from a validated configuration and a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::init(config, hash_builder),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Maximum number of entries, as a plain `usize`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segment.cap().get()
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Like [`get`](Self::get), but allows the value to be edited in place.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns the value for `key` without changing its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// The most recently used entry.
    #[inline]
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.segment.peek_mru()
    }

    /// The least recently used entry, i.e. the next one to be evicted.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.segment.peek_lru()
    }

    /// Removes `key`, returning its value if it was cached.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the least recently used entry.
    #[inline]
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.segment.pop_lru()
    }

    /// Removes every entry. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Iterates over entries from most to least recently used.
    ///
    /// Iterating does not change the recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.segment.iter()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.segment.slot_count()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns:
    /// - `Some((key, old_value))` if the key was already cached (its value is
    ///   replaced; nothing is evicted),
    /// - `Some((evicted_key, evicted_value))` if a new key filled a full cache
    ///   and the least recently used entry was evicted,
    /// - `None` if the new key fit without eviction.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("segment", &self.segment)
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over cache entries from most to least recently used.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: arena::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("inner", &self.inner).finish()
    }
}
