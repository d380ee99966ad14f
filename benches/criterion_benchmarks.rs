use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recency_cache::config::LruCacheConfig;
use recency_cache::LruCache;
use std::num::NonZeroUsize;

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        // Every put misses and evicts once the cache is full
        let mut next = CACHE_SIZE;
        group.bench_function("LRU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // Compared against the `lru` crate on the same workload
    {
        let mut cache = lru::LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("lru crate get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });
    }

    group.finish();

    let mut group = c.benchmark_group("Mixed Workload");
    for cap in [16usize, 1024, 65_536] {
        group.bench_with_input(BenchmarkId::new("LRU", cap), &cap, |b, &cap| {
            let mut cache = make_lru(cap);
            let mut state = 0x2545_F491_4F6C_DD1Du64;
            b.iter(|| {
                for _ in 0..100 {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    let key = (state % (cap as u64 * 2)) as usize;
                    if state & 1 == 0 {
                        black_box(cache.get(&key));
                    } else {
                        black_box(cache.put(key, key));
                    }
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
