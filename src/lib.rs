#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LruCache`] | Bounded LRU cache, single-threaded |
//! | [`ConcurrentLruCache`] | The same cache behind one lock (`concurrent` feature) |
//! | [`LruCacheConfig`] | Validated construction parameters |
//! | [`CacheError`] | Construction failure (`InvalidCapacity`) |
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `get_mut` | O(1) |
//! | `put` (insert, update or evict) | O(1) amortized |
//! | `remove` / `pop_lru` | O(1) |
//! | `peek` / `contains` / `peek_lru` | O(1), recency untouched |
//! | `clear` | O(n) |
//!
//! ## Example
//!
//! ```rust
//! use recency_cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## Concurrent Cache
//!
//! Enable the `concurrent` feature for the thread-safe version:
//!
//! ```toml
//! [dependencies]
//! recency-cache = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ## Logging
//!
//! The crate emits records through the [`log`] facade: `debug` when a cache
//! is created or cleared, `trace` on every eviction. Install any `log`
//! implementation to see them; without one they compile to no-ops.
//!
//! ## Modules
//!
//! - [`lru`]: LRU cache implementation
//! - [`config`]: Configuration structure
//! - [`error`]: Construction errors
//! - [`metrics`]: Hit, miss and eviction counters
//! - [`concurrent`]: Thread-safe cache (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Index-linked doubly linked list with sentinel slots.
///
/// Internal infrastructure for the cache; entries reference their neighbours
/// by position in a `Vec` rather than by pointer.
pub(crate) mod arena;

/// Cache configuration.
pub mod config;

/// Construction errors.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used item when
/// a new key arrives and the capacity is reached.
pub mod lru;

/// Cache metrics.
///
/// Counters for hits, misses, insertions and evictions, reported through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LruCacheConfig;
pub use error::CacheError;
pub use lru::LruCache;
pub use metrics::CacheMetrics;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
