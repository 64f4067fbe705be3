//! # Cache Trait Hierarchy
//!
//! Call surfaces for group-tagged caches, split the way the read side and the
//! write side are consumed.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            ReadOnlyCache<K>             │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                 GroupedCache<K, V, G>                       │
//!   │                                                             │
//!   │  set(&mut, K, V, G)                                         │
//!   │  set_time_aware(&mut, K, V, now, expires_at, G)             │
//!   │  get(&mut, &K, &G) → Option<&V>                             │
//!   │  get_time_aware(&mut, &K, now, &G) → Option<&V>             │
//!   │                                                             │
//!   │  ⚠ No remove/clear: entries leave only by recycling         │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Miss semantics
//!
//! Every read failure is `None`: an absent key, a group mismatch, and a stale
//! time window are indistinguishable to the caller. A miss never mutates the
//! cache; the caller is expected to follow it with a write for the same key.
//!
//! ## Example
//!
//! ```
//! use groupcache::policy::group_lru::BoundedGroupCache;
//! use groupcache::traits::{GroupedCache, ReadOnlyCache};
//!
//! fn warm<C: GroupedCache<&'static str, u32, u64>>(cache: &mut C, group: u64) {
//!     cache.set("a", 1, group);
//!     cache.set("b", 2, group);
//! }
//!
//! let mut cache = BoundedGroupCache::new(8);
//! warm(&mut cache, 1);
//! assert_eq!(cache.len(), 2);
//! assert_eq!(cache.get(&"a", &1), Some(&1));
//! assert_eq!(cache.get(&"a", &2), None);
//! ```

/// Logical timestamp supplied by callers of the time-aware operations.
///
/// Only ordering matters; values need not be wall-clock time.
pub type Timestamp = u64;

/// Non-promoting inspection shared by every cache.
pub trait ReadOnlyCache<K> {
    /// Returns `true` if `key` has a live entry, whatever its group or window.
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed maximum number of live entries.
    fn capacity(&self) -> usize;
}

/// Recency-ordered cache with group-based and time-based staleness.
pub trait GroupedCache<K, V, G>: ReadOnlyCache<K> {
    /// Writes a non-expiring entry and makes it most-recently-used.
    ///
    /// Equivalent to `set_time_aware(key, value, 0, 0, group)`.
    fn set(&mut self, key: K, value: V, group: G) {
        self.set_time_aware(key, value, 0, 0, group);
    }

    /// Writes an entry valid for reads in `[now, expires_at)` and makes it
    /// most-recently-used, recycling the oldest entry when full.
    fn set_time_aware(
        &mut self,
        key: K,
        value: V,
        now: Timestamp,
        expires_at: Timestamp,
        group: G,
    );

    /// Returns the value if present and written under `group`, promoting it.
    fn get(&mut self, key: &K, group: &G) -> Option<&V>;

    /// Like [`get`](Self::get), additionally requiring
    /// `set_at <= now < expires_at`.
    fn get_time_aware(&mut self, key: &K, now: Timestamp, group: &G) -> Option<&V>;
}

/// Why a read returned `None`.
///
/// Callers only ever see `None`; the reason feeds metrics and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// No entry for the key.
    Absent,
    /// Entry written under a different group id.
    GroupMismatch,
    /// Read time precedes the entry's write time.
    NotYetValid,
    /// Read time is at or past the entry's expiry.
    Expired,
}
