//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* so counters never leak
//! into cache logic.
//!
//! ```text
//!   ┌──────────────────────────────────┐   ┌──────────────────────────────┐
//!   │   GroupCacheMetricsRecorder      │   │ GroupCacheMetricsReadRecorder│
//!   │   get hit / miss by reason       │   │ peek (through &self)         │
//!   │   insert new / update / recycle  │   └──────────────────────────────┘
//!   └──────────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

pub use crate::traits::MissReason;

/// Counters recorded by the mutating operations.
pub trait GroupCacheMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self, reason: MissReason);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_recycled_entry(&mut self);
}

/// Counters recorded through `&self` (uses interior mutability).
pub trait GroupCacheMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Expose a point-in-time snapshot for tests and benchmarks.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
