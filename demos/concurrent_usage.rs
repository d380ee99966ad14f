//! Concurrent Cache Usage
//!
//! Shares one cache between worker threads that memoize an expensive
//! computation.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use recency_cache::metrics::CacheMetrics;
use recency_cache::{CacheError, ConcurrentLruCache};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn slow_square(n: u64) -> u64 {
    // Stand-in for a costly lookup
    (0..n).fold(0, |acc, _| acc + n)
}

fn main() -> Result<(), CacheError> {
    let cache: Arc<ConcurrentLruCache<u64, u64>> = Arc::new(ConcurrentLruCache::new(256)?);
    let start = Instant::now();

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..10_000u64 {
                    let n = (t * 13 + i * 7) % 512;
                    if cache.get(&n).is_none() {
                        cache.put(n, slow_square(n));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    println!("finished in {:?}", start.elapsed());
    println!("entries: {} / {}", cache.len(), cache.capacity());
    for (name, value) in cache.metrics() {
        println!("  {:<14} {:>10.3}", name, value);
    }

    Ok(())
}
