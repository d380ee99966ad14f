//! Cache Configuration
//!
//! Configuration for [`LruCache`](crate::LruCache) and, with the `concurrent`
//! feature, [`ConcurrentLruCache`](crate::ConcurrentLruCache).
//!
//! The config struct has public fields for simple instantiation. The capacity
//! is a [`NonZeroUsize`](core::num::NonZeroUsize), so a config that exists is
//! always valid; use [`LruCacheConfig::new`] to validate a plain integer.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. The arena backing the cache
//! holds `capacity + 2` slots at most (two sentinel slots bracket the
//! recency list), each slot carrying the key, the value and two `usize` links.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Validating an untrusted capacity
//! assert!(LruCacheConfig::new(0).is_err());
//! assert!(LruCacheConfig::new(-1).is_err());
//! assert!(LruCacheConfig::new(16u64).is_ok());
//! ```

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Fixed for the
///   lifetime of the cache.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from any integer capacity.
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is below one or
    /// cannot be represented as a `usize`.
    pub fn new<C>(capacity: C) -> Result<Self>
    where
        C: TryInto<usize>,
    {
        let capacity = capacity
            .try_into()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(CacheError::InvalidCapacity)?;
        Ok(Self { capacity })
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
