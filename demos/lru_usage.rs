//! LRU Cache Usage
//!
//! Walks through construction, hits, misses, updates and eviction, then prints
//! the cache metrics.
//!
//! Run with: cargo run --example lru_usage

use recency_cache::metrics::CacheMetrics;
use recency_cache::{CacheError, LruCache};

fn main() -> Result<(), CacheError> {
    // A zero-capacity cache is rejected at construction
    match LruCache::<&str, u32>::new(0) {
        Ok(_) => unreachable!("capacity 0 must be rejected"),
        Err(e) => println!("new(0) -> {}", e),
    }

    let mut cache = LruCache::new(3)?;
    cache.put("alpha", 1);
    cache.put("beta", 2);
    cache.put("gamma", 3);
    print_order("after three puts", &cache);

    println!("get(alpha) -> {:?}", cache.get(&"alpha"));
    println!("get(omega) -> {:?}", cache.get(&"omega"));
    print_order("after get(alpha)", &cache);

    if let Some((key, old)) = cache.put("beta", 20) {
        println!("put(beta, 20) replaced {} = {}", key, old);
    }

    if let Some((key, value)) = cache.put("delta", 4) {
        println!("put(delta, 4) evicted {} = {}", key, value);
    }
    print_order("after put(delta)", &cache);

    println!("\n{} metrics:", cache.algorithm_name());
    for (name, value) in cache.metrics() {
        println!("  {:<14} {:>8.3}", name, value);
    }

    Ok(())
}

fn print_order(label: &str, cache: &LruCache<&str, u32>) {
    let keys: Vec<&str> = cache.iter().map(|(k, _)| *k).collect();
    println!("{:<20} MRU -> LRU: {:?}", label, keys);
}
