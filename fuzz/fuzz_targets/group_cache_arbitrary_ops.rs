#![no_main]

use groupcache::policy::group_lru::BoundedGroupCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on BoundedGroupCache
//
// The first byte picks the capacity; every following 4-byte chunk is one of
// set, set_time_aware, get, get_time_aware, or peek. Structural invariants
// are checked after each operation.
fuzz_target!(|data: &[u8]| {
    let Some((&capacity, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(capacity % 16);
    let mut cache: BoundedGroupCache<u8, u32, u8> = BoundedGroupCache::new(capacity);

    for chunk in ops.chunks_exact(4) {
        let key = chunk[1] % 32;
        let group = chunk[2] % 4;
        let tick = u64::from(chunk[3]);

        match chunk[0] % 5 {
            0 => {
                cache.set(key, u32::from(chunk[3]), group);
                assert!(cache.contains(&key) || capacity == 0);
            }
            1 => {
                let expires_at = tick + u64::from(chunk[0] >> 4);
                cache.set_time_aware(key, u32::from(chunk[3]), tick, expires_at, group);
                if capacity > 0 && tick < expires_at {
                    assert!(cache.get_time_aware(&key, tick, &group).is_some());
                }
            }
            2 => {
                let _ = cache.get(&key, &group);
            }
            3 => {
                let _ = cache.get_time_aware(&key, tick, &group);
            }
            _ => {
                let _ = cache.peek(&key, &group);
            }
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
