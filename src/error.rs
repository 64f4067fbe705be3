//! Error types for the groupcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache options cannot be turned into a
//!   capacity (absent, non-integer, or negative `max`).
//! - [`InvariantError`]: Returned by `check_invariants` when the recency list
//!   and the key index disagree.
//!
//! Reads and writes never fail: a miss is `None`, not an error.
//!
//! ## Example Usage
//!
//! ```
//! use groupcache::error::ConfigError;
//! use groupcache::options::GroupCacheOptions;
//! use groupcache::policy::group_lru::BoundedGroupCache;
//!
//! // Strict constructor for callers that prefer to fail fast
//! let cache: Result<BoundedGroupCache<String, i32>, ConfigError> =
//!     BoundedGroupCache::try_from_options(&GroupCacheOptions::with_max(10));
//! assert!(cache.is_ok());
//!
//! let bad = BoundedGroupCache::<String, i32>::try_from_options(&GroupCacheOptions::with_max(-1));
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`GroupCacheOptions::resolve_capacity`](crate::options::GroupCacheOptions::resolve_capacity).
/// The lenient constructors turn it into a diagnostic and fall back to the
/// default capacity instead of returning it.
///
/// # Example
///
/// ```
/// use groupcache::options::GroupCacheOptions;
///
/// let err = GroupCacheOptions::with_max("foo").resolve_capacity().unwrap_err();
/// assert!(err.to_string().contains("max"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("map has 3 keys but list has 2 nodes");
        assert_eq!(err.to_string(), "map has 3 keys but list has 2 nodes");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("dangling link");
        assert_eq!(err.message(), "dangling link");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max must be a non-negative integer");
        assert_eq!(err.to_string(), "max must be a non-negative integer");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("max is missing");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "max is missing");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
