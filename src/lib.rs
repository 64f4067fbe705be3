//! groupcache: bounded LRU cache with group-based lazy invalidation and
//! time-aware entries, for memoizing expensive per-key resolution work.
//!
//! See [`policy::group_lru`] for the entry lifecycle, eviction policy, and
//! staleness rules.

pub mod diagnostics;
pub(crate) mod ds;
pub mod error;
pub mod options;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::GroupCacheMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::group_lru::ConcurrentGroupCache;
pub use crate::policy::group_lru::BoundedGroupCache;
