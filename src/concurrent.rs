//! Concurrent Cache
//!
//! A thread-safe wrapper around the LRU algorithm, available with the
//! `concurrent` feature.
//!
//! # Why One Mutex?
//!
//! Every `get()` moves the accessed entry to the front of the recency list, so
//! a read is a write. An `RwLock` would hand out the exclusive lock on every
//! call anyway, and `parking_lot::Mutex` is cheaper.
//!
//! Splitting the key space across several locks (lock striping) raises
//! throughput but makes recency per-stripe: an entry could be evicted while an
//! older one survives in another stripe. [`ConcurrentLruCache`] keeps a single
//! lock so that eviction always picks the globally least recently used entry.
//!
//! # Thread Safety
//!
//! `ConcurrentLruCache` is `Send + Sync` whenever its keys, values and hasher
//! are `Send`, and can be shared through an `Arc`.
//!
//! # Zero-Copy Access
//!
//! [`ConcurrentLruCache::get`] clones the value so the lock is released before
//! it returns. `get_with()` reads the value while the lock is held instead:
//!
//! ```rust
//! use recency_cache::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::new(16).unwrap();
//! cache.put("greeting", String::from("hello"));
//! let len = cache.get_with(&"greeting", |value| value.len());
//! assert_eq!(len, Some(5));
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
