// ==============================================
// CONCURRENT GROUP CACHE TESTS (integration)
// ==============================================
//
// The core cache is single-threaded; ConcurrentGroupCache serializes access
// with a mutex. These tests hammer it from several threads and check that
// capacity and link structure survive.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use groupcache::ConcurrentGroupCache;

mod contention {
    use super::*;

    #[test]
    fn mixed_readers_and_writers_preserve_invariants() {
        let threads = 8;
        let cache: Arc<ConcurrentGroupCache<u32, Arc<String>>> =
            Arc::new(ConcurrentGroupCache::new(32));
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads as u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2_000u32 {
                        let key = (t * 7 + i) % 64;
                        let group = u64::from(i / 500);
                        match cache.get(&key, &group) {
                            Some(value) => assert!(value.starts_with("ctx-")),
                            None => cache.set(key, Arc::new(format!("ctx-{key}")), group),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 32);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn group_bump_is_seen_by_all_threads() {
        let cache = Arc::new(ConcurrentGroupCache::<u8, u8>::new(16));
        for k in 0..16u8 {
            cache.set(k, k, 1);
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || (0..16u8).all(|k| cache.get(&k, &2).is_none()))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.len(), 16);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn shared_peeks_are_all_counted() {
        use groupcache::metrics::traits::MetricsSnapshotProvider;

        let threads = 8;
        let rounds = 20_000u64;
        let cache = Arc::new(ConcurrentGroupCache::<u8, u8>::new(4));
        cache.set(1, 1, 0);

        thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for _ in 0..rounds {
                        assert_eq!(cache.peek(&1, &0), Some(1));
                    }
                });
            }
        });

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.peek_calls, threads * rounds);
        assert_eq!(snapshot.peek_found, threads * rounds);
    }
}
