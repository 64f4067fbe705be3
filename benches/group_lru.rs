use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use groupcache::policy::group_lru::BoundedGroupCache;

fn filled(capacity: u64) -> BoundedGroupCache<u64, u64> {
    let mut cache = BoundedGroupCache::new(capacity as usize);
    for i in 0..capacity {
        cache.set(i, i, 1);
    }
    cache
}

fn bench_group_lru_get_hit(c: &mut Criterion) {
    let mut cache = filled(1024);
    c.bench_function("group_lru_get_hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % 1024;
            std::hint::black_box(cache.get(&std::hint::black_box(i), &1).copied())
        })
    });
}

fn bench_group_lru_group_miss(c: &mut Criterion) {
    let mut cache = filled(1024);
    c.bench_function("group_lru_group_miss", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % 1024;
            std::hint::black_box(cache.get(&std::hint::black_box(i), &2).copied())
        })
    });
}

fn bench_group_lru_recycle_churn(c: &mut Criterion) {
    c.bench_function("group_lru_recycle_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.set(std::hint::black_box(10_000 + i), i, 1);
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_group_lru_time_aware_miss_then_set(c: &mut Criterion) {
    c.bench_function("group_lru_time_aware_miss_then_set", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for now in 0..1024u64 {
                    if cache.get_time_aware(&now, now, &1).is_none() {
                        cache.set_time_aware(now, now, now, now + 100, 1);
                    }
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_group_lru_get_hit,
    bench_group_lru_group_miss,
    bench_group_lru_recycle_churn,
    bench_group_lru_time_aware_miss_then_set
);
criterion_main!(benches);
