//! Pluggable sink for construction-time diagnostics.
//!
//! The cache itself never logs on the read/write path. The only anomaly it
//! reports is a malformed capacity, which is recovered from by falling back
//! to [`DEFAULT_CAPACITY`](crate::options::DEFAULT_CAPACITY). Where that
//! report goes is up to the caller:
//!
//! - [`TracingSink`] (default): a `WARN` event through `tracing`.
//! - [`NoopSink`]: discard.
//! - any `Fn(&Diagnostic)` closure.
//!
//! ```
//! use std::cell::RefCell;
//!
//! use groupcache::diagnostics::Diagnostic;
//! use groupcache::options::GroupCacheOptions;
//! use groupcache::policy::group_lru::BoundedGroupCache;
//!
//! let seen = RefCell::new(Vec::new());
//! let sink = |d: &Diagnostic| seen.borrow_mut().push(d.to_string());
//! let cache: BoundedGroupCache<&str, u32> =
//!     BoundedGroupCache::from_options_with_sink(&GroupCacheOptions::with_max(-1), &sink);
//!
//! assert_eq!(cache.capacity(), 100);
//! assert_eq!(seen.borrow().len(), 1);
//! ```

use std::fmt;

use crate::error::ConfigError;
use crate::options::GroupCacheOptions;

/// A recoverable anomaly observed while building a cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// `max` could not be resolved; the cache was built with `fallback`.
    InvalidCapacity {
        options: GroupCacheOptions,
        reason: ConfigError,
        fallback: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidCapacity {
                options,
                reason,
                fallback,
            } => write!(
                f,
                "invalid cache options {options:?} ({reason}); using default capacity {fallback}"
            ),
        }
    }
}

/// Receives diagnostics emitted during cache construction.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::InvalidCapacity {
                options,
                reason,
                fallback,
            } => tracing::warn!(
                options = ?options,
                reason = %reason,
                fallback,
                "invalid cache capacity, falling back to default"
            ),
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}
