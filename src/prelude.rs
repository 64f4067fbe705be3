pub use crate::diagnostics::{Diagnostic, DiagnosticSink, NoopSink, TracingSink};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::GroupCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::options::{DEFAULT_CAPACITY, GroupCacheOptions};
#[cfg(feature = "concurrency")]
pub use crate::policy::group_lru::ConcurrentGroupCache;
pub use crate::policy::group_lru::BoundedGroupCache;
pub use crate::traits::{GroupedCache, MissReason, ReadOnlyCache, Timestamp};
