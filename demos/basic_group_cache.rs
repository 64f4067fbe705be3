use groupcache::policy::group_lru::BoundedGroupCache;

fn main() {
    let mut cache: BoundedGroupCache<&str, String> = BoundedGroupCache::new(2);

    cache.set("a", "alpha".to_string(), 1);
    cache.set("b", "beta".to_string(), 1);

    if let Some(value) = cache.get(&"a", &1) {
        println!("hit a: {value}");
    }

    cache.set("c", "gamma".to_string(), 1);
    println!("contains b? {}", cache.contains(&"b"));

    println!("a under group 2: {:?}", cache.get(&"a", &2));
}

// Expected output:
// hit a: alpha
// contains b? false
// a under group 2: None
//
// Explanation: capacity=2; after get(a), a is youngest and b is oldest.
// Setting c recycles b. Reading a with a newer group id misses without
// evicting it.
