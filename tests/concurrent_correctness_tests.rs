//! Concurrent Cache Correctness Tests
//!
//! These tests validate that the concurrent cache keeps exact LRU semantics
//! and its invariants while being accessed from multiple threads.
//!
//! ## Segments
//!
//! 1. **Algorithm Correctness**: eviction order matches the single-threaded cache
//! 2. **Thread Safety Invariants**: state stays consistent under contention

#![cfg(feature = "concurrent")]

use recency_cache::config::LruCacheConfig;
use recency_cache::metrics::CacheMetrics;
use recency_cache::{ConcurrentLruCache, LruCache};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 8;
const OPS_PER_THREAD: usize = 5_000;

fn make_cache<K, V>(cap: usize) -> ConcurrentLruCache<K, V>
where
    K: std::hash::Hash + Eq + Clone,
{
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    ConcurrentLruCache::init(config, None)
}

// ============================================================================
// SEGMENT 1: ALGORITHM CORRECTNESS
// ============================================================================

#[test]
fn test_concurrent_lru_access_prevents_eviction() {
    let cache: Arc<ConcurrentLruCache<i32, i32>> = Arc::new(make_cache(3));

    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);

    // Touch key 1 from another thread
    let reader = Arc::clone(&cache);
    thread::spawn(move || {
        assert_eq!(reader.get(&1), Some(10));
    })
    .join()
    .unwrap();

    // Key 2 is now the least recently used
    assert_eq!(cache.put(4, 40), Some((2, 20)));
    assert!(cache.contains(&1));
    assert!(cache.contains(&3));
    assert!(cache.contains(&4));
}

#[test]
fn test_concurrent_lru_matches_single_threaded_order() {
    let concurrent: ConcurrentLruCache<u32, u32> = make_cache(8);
    let mut single: LruCache<u32, u32> = LruCache::new(8).unwrap();

    for i in 0..200u32 {
        let key = (i * 7) % 23;
        if i % 3 == 0 {
            assert_eq!(concurrent.get(&key), single.get(&key).copied());
        } else {
            assert_eq!(concurrent.put(key, i), single.put(key, i));
        }
    }

    let single_keys: Vec<u32> = single.iter().map(|(k, _)| *k).collect();
    assert_eq!(concurrent.keys(), single_keys);
}

#[test]
fn test_concurrent_lru_capacity_one() {
    let cache: ConcurrentLruCache<&str, i32> = make_cache(1);
    assert_eq!(cache.put("a", 1), None);
    assert_eq!(cache.put("b", 2), Some(("a", 1)));
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
}

// ============================================================================
// SEGMENT 2: THREAD SAFETY INVARIANTS
// ============================================================================

#[test]
fn test_concurrent_len_never_exceeds_capacity() {
    const CAP: usize = 64;
    let cache: Arc<ConcurrentLruCache<usize, usize>> = Arc::new(make_cache(CAP));
    let violations = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let violations = Arc::clone(&violations);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = (t * 31 + i) % 500;
                    cache.put(key, i);
                    if cache.len() > CAP {
                        violations.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(violations.load(Ordering::Relaxed), 0);
    assert_eq!(cache.len(), CAP);
}

#[test]
fn test_concurrent_counters_add_up() {
    let cache: Arc<ConcurrentLruCache<usize, usize>> = Arc::new(make_cache(100));
    let hits = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = (t + i) % 150;
                    if i % 2 == 0 {
                        cache.put(key, i);
                    } else if cache.get(&key).is_some() {
                        hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let metrics = cache.metrics();
    let requests = (NUM_THREADS * OPS_PER_THREAD / 2) as f64;
    assert_eq!(metrics.get("requests"), Some(&requests));
    assert_eq!(
        metrics.get("cache_hits"),
        Some(&(hits.load(Ordering::Relaxed) as f64))
    );
    let insertions = metrics["insertions"];
    let evictions = metrics["evictions"];
    assert_eq!(insertions - evictions, cache.len() as f64);
}

#[test]
fn test_concurrent_keys_stay_consistent_under_churn() {
    let cache: Arc<ConcurrentLruCache<String, usize>> = Arc::new(make_cache(32));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = format!("key_{}", (t * 7 + i) % 64);
                    match i % 5 {
                        0 | 1 => {
                            cache.put(key, i);
                        }
                        2 => {
                            let _ = cache.get(&key);
                        }
                        3 => {
                            let _ = cache.remove(&key);
                        }
                        _ => {
                            let _ = cache.pop_lru();
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let keys = cache.keys();
    assert_eq!(keys.len(), cache.len());
    assert!(keys.len() <= 32);
    for key in &keys {
        assert!(cache.contains(key), "listed key {} missing from index", key);
    }
}
