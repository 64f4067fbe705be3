//! # Bounded LRU Cache with Group Invalidation
//!
//! Memoizes expensive per-key lookups (resolved configuration contexts, for
//! example) behind a fixed capacity, least-recently-used eviction, and two
//! kinds of lazy staleness:
//!
//! - **Group ids**: every entry is tagged with the group it was written under.
//!   A read must present the same group or it misses. Bumping the group id
//!   callers pass invalidates every older entry at once, without a sweep.
//! - **Time windows**: time-aware entries are valid for reads in
//!   `[set_at, expires_at)`, measured in caller-supplied logical ticks.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                    BoundedGroupCache<K, V, G>                        │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>                                        │   │
//!   │   │   "ctx:en-US" ──────────────────────────────┐                │   │
//!   │   │   "ctx:fr-FR" ───────────────────┐          │                │   │
//!   │   │   "ctx:de-DE" ────────┐          │          │                │   │
//!   │   └───────────────────────┼──────────┼──────────┼────────────────┘   │
//!   │                           ▼          ▼          ▼                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V, G>>                                 │   │
//!   │   │                                                              │   │
//!   │   │  youngest ──► [de-DE] ◄──► [fr-FR] ◄──► [en-US] ◄── oldest   │   │
//!   │   │                                                              │   │
//!   │   │  Entry { key, value, set_at, expires_at, group }             │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write flow
//!
//! ```text
//!   set_time_aware(k, v, now, expires_at, g)
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!   capacity == 0      → no-op
//!   k present          → overwrite value/set_at/expires_at/group in place,
//!                        move to youngest; len unchanged
//!   len == capacity    → recycle oldest: drop its key from the map, overwrite
//!                        every field, re-index under k, move to youngest
//!   otherwise          → allocate a node at youngest, index it
//! ```
//!
//! Recycling is the only eviction path. It happens on insertion pressure
//! only, never on a timer and never on a stale read.
//!
//! ## Read flow
//!
//! ```text
//!   get(k, g)                    get_time_aware(k, now, g)
//!   ─────────────────────────    ─────────────────────────────────────────
//!   absent          → None       absent                 → None
//!   group != g      → None       group != g             → None
//!                                now <  set_at          → None
//!                                now >= expires_at      → None
//!   otherwise       → promote,   otherwise              → promote, Some(&v)
//!                     Some(&v)
//! ```
//!
//! A miss leaves the entry untouched. Callers follow a miss with a write for
//! the same key, which overwrites the stale entry in place. A stale entry that
//! is never rewritten lingers until capacity pressure recycles it.
//!
//! ## Performance Characteristics
//!
//! | Operation          | Time     | Notes                                 |
//! |--------------------|----------|---------------------------------------|
//! | `set`              | O(1) avg | Index lookup + list relink            |
//! | `set_time_aware`   | O(1) avg | Same; recycling allocates nothing     |
//! | `get`              | O(1) avg | Index lookup + list relink on hit     |
//! | `get_time_aware`   | O(1) avg | Same                                  |
//! | `peek`             | O(1) avg | Index lookup only                     |
//! | `check_invariants` | O(n)     | Forward + backward walk               |
//!
//! ## Thread Safety
//!
//! - `BoundedGroupCache`: **NOT thread-safe**. Reads promote, so every
//!   operation needs `&mut self`; serialize access externally or keep one
//!   cache per worker.
//! - `ConcurrentGroupCache` (feature `concurrency`): the same cache behind a
//!   `parking_lot::Mutex`, returning cloned values.
//!
//! Values are stored as given and handed out by reference. Store `Arc<V>` to
//! share a value with callers; mutating it through interior mutability is
//! visible to later reads.
//!
//! ## Example Usage
//!
//! ```
//! use groupcache::policy::group_lru::BoundedGroupCache;
//!
//! let mut cache: BoundedGroupCache<&str, &str> = BoundedGroupCache::new(2);
//!
//! cache.set("a", "alpha", 1);
//! cache.set("b", "beta", 1);
//! assert_eq!(cache.get(&"a", &1), Some(&"alpha")); // a is youngest now
//!
//! cache.set("c", "gamma", 1); // recycles b
//! assert_eq!(cache.get(&"b", &1), None);
//!
//! // Bumping the group id invalidates everything written before.
//! assert_eq!(cache.get(&"a", &2), None);
//!
//! // Time-aware entries are valid in [set_at, expires_at).
//! cache.set_time_aware("t", "tick", 10, 1000, 1);
//! assert_eq!(cache.get_time_aware(&"t", 999, &1), Some(&"tick"));
//! assert_eq!(cache.get_time_aware(&"t", 1000, &1), None);
//! ```

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::GroupCacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::GroupCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    GroupCacheMetricsReadRecorder, GroupCacheMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::options::{DEFAULT_CAPACITY, GroupCacheOptions};
use crate::traits::{GroupedCache, MissReason, ReadOnlyCache, Timestamp};

// Upper bound on up-front allocation; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// One cached record. Links live in the owning `RecencyList` node.
#[derive(Debug)]
struct Entry<K, V, G> {
    key: K,
    value: V,
    set_at: Timestamp,
    expires_at: Timestamp,
    group: G,
}

/// Fixed-capacity, recency-ordered cache with group-based lazy invalidation.
///
/// `K` is the lookup key, `V` the cached payload, `G` the group tag (any
/// `PartialEq` type; `u64` by default).
///
/// A capacity of 0 builds an inert cache: writes are dropped and every read
/// misses.
pub struct BoundedGroupCache<K, V, G = u64> {
    map: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V, G>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: GroupCacheMetrics,
}

impl<K, V, G> BoundedGroupCache<K, V, G>
where
    K: Eq + Hash + Clone,
    G: PartialEq,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Example
    /// ```
    /// use groupcache::policy::group_lru::BoundedGroupCache;
    ///
    /// let cache: BoundedGroupCache<u32, String> = BoundedGroupCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Self {
            map: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            list: RecencyList::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: GroupCacheMetrics::default(),
        }
    }

    /// Builds a cache from configuration, falling back to
    /// [`DEFAULT_CAPACITY`] with a `tracing` warning if `max` is invalid.
    pub fn from_options(options: &GroupCacheOptions) -> Self {
        Self::from_options_with_sink(options, &TracingSink)
    }

    /// Like [`from_options`](Self::from_options), reporting an invalid `max`
    /// to `sink` instead.
    pub fn from_options_with_sink<S>(options: &GroupCacheOptions, sink: &S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        match options.resolve_capacity() {
            Ok(capacity) => Self::new(capacity),
            Err(reason) => {
                sink.report(&Diagnostic::InvalidCapacity {
                    options: options.clone(),
                    reason,
                    fallback: DEFAULT_CAPACITY,
                });
                Self::new(DEFAULT_CAPACITY)
            },
        }
    }

    /// Builds a cache from configuration, failing on an invalid `max`.
    pub fn try_from_options(options: &GroupCacheOptions) -> Result<Self, ConfigError> {
        options.resolve_capacity().map(Self::new)
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fixed maximum number of live entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` has an entry, regardless of group or window.
    ///
    /// Does not affect recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Writes a non-expiring entry under `group`.
    ///
    /// Equivalent to `set_time_aware(key, value, 0, 0, group)`.
    #[inline]
    pub fn set(&mut self, key: K, value: V, group: G) {
        self.set_time_aware(key, value, 0, 0, group);
    }

    /// Writes an entry valid for reads in `[now, expires_at)` under `group`.
    ///
    /// Always leaves `key` as the most-recently-used entry. When the cache is
    /// full and `key` is new, the oldest entry is recycled to hold it.
    pub fn set_time_aware(
        &mut self,
        key: K,
        value: V,
        now: Timestamp,
        expires_at: Timestamp,
        group: G,
    ) {
        if self.capacity == 0 {
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
                entry.set_at = now;
                entry.expires_at = expires_at;
                entry.group = group;
            }
            self.list.move_to_front(id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
        } else if self.map.len() >= self.capacity {
            self.recycle_oldest(key, value, now, expires_at, group);
        } else {
            let id = self.list.push_front(Entry {
                key: key.clone(),
                value,
                set_at: now,
                expires_at,
                group,
            });
            self.map.insert(key, id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();
        }

        debug_assert_eq!(self.map.len(), self.list.len());
        debug_assert!(self.map.len() <= self.capacity);
    }

    /// Returns the value for `key` if it was written under `group`, making it
    /// the most-recently-used entry.
    ///
    /// Time windows are not consulted.
    pub fn get(&mut self, key: &K, group: &G) -> Option<&V> {
        if self.capacity == 0 {
            return None;
        }
        let probe = self.probe(key, None, group);
        self.promote_hit(probe)
    }

    /// Returns the value for `key` if it was written under `group` and
    /// `set_at <= now < expires_at`, making it the most-recently-used entry.
    ///
    /// An entry written with plain [`set`](Self::set) has `expires_at == 0`
    /// and therefore always misses here.
    pub fn get_time_aware(&mut self, key: &K, now: Timestamp, group: &G) -> Option<&V> {
        if self.capacity == 0 {
            return None;
        }
        let probe = self.probe(key, Some(now), group);
        self.promote_hit(probe)
    }

    /// Group-checked read that leaves recency untouched.
    pub fn peek(&self, key: &K, group: &G) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = self.probe(key, None, group).ok()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        self.list.get(id).map(|entry| &entry.value)
    }

    /// Verifies the structural invariants of the key index and recency list.
    ///
    /// Checks that `len <= capacity`, that the index and the list hold the
    /// same number of entries, that the list is consistently doubly linked
    /// with open ends, and that every list node is indexed under its own key.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map has {} keys but list has {} nodes",
                self.map.len(),
                self.list.len()
            )));
        }
        self.list.check_links()?;
        for id in self.list.iter_ids() {
            let entry = self
                .list
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("slot {} vanished", id.index())))?;
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn probe(&self, key: &K, now: Option<Timestamp>, group: &G) -> Result<SlotId, MissReason> {
        let &id = self.map.get(key).ok_or(MissReason::Absent)?;
        let entry = self.list.get(id).ok_or(MissReason::Absent)?;
        if entry.group != *group {
            return Err(MissReason::GroupMismatch);
        }
        if let Some(now) = now {
            if now < entry.set_at {
                return Err(MissReason::NotYetValid);
            }
            if now >= entry.expires_at {
                return Err(MissReason::Expired);
            }
        }
        Ok(id)
    }

    fn promote_hit(&mut self, probe: Result<SlotId, MissReason>) -> Option<&V> {
        match probe {
            Ok(id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();

                self.list.move_to_front(id);
                self.list.get(id).map(|entry| &entry.value)
            },
            Err(reason) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss(reason);

                tracing::trace!(?reason, "cache miss");
                None
            },
        }
    }

    // Overwrites the oldest entry in place instead of freeing it.
    fn recycle_oldest(
        &mut self,
        key: K,
        value: V,
        now: Timestamp,
        expires_at: Timestamp,
        group: G,
    ) {
        let Some(id) = self.list.back_id() else {
            return;
        };
        let old_key = {
            let Some(entry) = self.list.get_mut(id) else {
                return;
            };
            entry.value = value;
            entry.set_at = now;
            entry.expires_at = expires_at;
            entry.group = group;
            std::mem::replace(&mut entry.key, key.clone())
        };
        self.map.remove(&old_key);
        self.map.insert(key, id);
        self.list.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_recycled_entry();

        tracing::trace!(slot = id.index(), "recycled oldest entry");
    }
}

impl<K, V, G> fmt::Debug for BoundedGroupCache<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedGroupCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V, G> ReadOnlyCache<K> for BoundedGroupCache<K, V, G>
where
    K: Eq + Hash + Clone,
    G: PartialEq,
{
    fn contains(&self, key: &K) -> bool {
        BoundedGroupCache::contains(self, key)
    }

    fn len(&self) -> usize {
        BoundedGroupCache::len(self)
    }

    fn capacity(&self) -> usize {
        BoundedGroupCache::capacity(self)
    }
}

impl<K, V, G> GroupedCache<K, V, G> for BoundedGroupCache<K, V, G>
where
    K: Eq + Hash + Clone,
    G: PartialEq,
{
    fn set_time_aware(
        &mut self,
        key: K,
        value: V,
        now: Timestamp,
        expires_at: Timestamp,
        group: G,
    ) {
        BoundedGroupCache::set_time_aware(self, key, value, now, expires_at, group);
    }

    fn get(&mut self, key: &K, group: &G) -> Option<&V> {
        BoundedGroupCache::get(self, key, group)
    }

    fn get_time_aware(&mut self, key: &K, now: Timestamp, group: &G) -> Option<&V> {
        BoundedGroupCache::get_time_aware(self, key, now, group)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, G> MetricsSnapshotProvider<GroupCacheMetricsSnapshot> for BoundedGroupCache<K, V, G> {
    fn snapshot(&self) -> GroupCacheMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, G> MetricsReset for BoundedGroupCache<K, V, G> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

/// Thread-safe wrapper around [`BoundedGroupCache`] using a
/// `parking_lot::Mutex`.
///
/// Every read promotes, so every operation takes the lock exclusively. Reads
/// return clones; store `Arc<V>` to keep them cheap.
#[cfg(feature = "concurrency")]
pub struct ConcurrentGroupCache<K, V, G = u64> {
    inner: Mutex<BoundedGroupCache<K, V, G>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, G> ConcurrentGroupCache<K, V, G>
where
    K: Eq + Hash + Clone,
    V: Clone,
    G: PartialEq,
{
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(BoundedGroupCache::new(capacity))
    }

    pub fn from_options(options: &GroupCacheOptions) -> Self {
        Self::from_cache(BoundedGroupCache::from_options(options))
    }

    pub fn from_options_with_sink<S>(options: &GroupCacheOptions, sink: &S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        Self::from_cache(BoundedGroupCache::from_options_with_sink(options, sink))
    }

    /// Wraps an existing single-threaded cache.
    pub fn from_cache(cache: BoundedGroupCache<K, V, G>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn set(&self, key: K, value: V, group: G) {
        self.inner.lock().set(key, value, group);
    }

    pub fn set_time_aware(
        &self,
        key: K,
        value: V,
        now: Timestamp,
        expires_at: Timestamp,
        group: G,
    ) {
        self.inner
            .lock()
            .set_time_aware(key, value, now, expires_at, group);
    }

    pub fn get(&self, key: &K, group: &G) -> Option<V> {
        self.inner.lock().get(key, group).cloned()
    }

    pub fn get_time_aware(&self, key: &K, now: Timestamp, group: &G) -> Option<V> {
        self.inner.lock().get_time_aware(key, now, group).cloned()
    }

    pub fn peek(&self, key: &K, group: &G) -> Option<V> {
        self.inner.lock().peek(key, group).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    /// Unwraps the single-threaded cache.
    pub fn into_inner(self) -> BoundedGroupCache<K, V, G> {
        self.inner.into_inner()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, G> fmt::Debug for ConcurrentGroupCache<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentGroupCache").finish_non_exhaustive()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V, G> MetricsSnapshotProvider<GroupCacheMetricsSnapshot> for ConcurrentGroupCache<K, V, G> {
    fn snapshot(&self) -> GroupCacheMetricsSnapshot {
        self.inner.lock().snapshot()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V, G> MetricsReset for ConcurrentGroupCache<K, V, G> {
    fn reset_metrics(&mut self) {
        self.inner.get_mut().reset_metrics();
    }
}
