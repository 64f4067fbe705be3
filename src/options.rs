//! Construction options for [`BoundedGroupCache`](crate::policy::group_lru::BoundedGroupCache).
//!
//! Options usually come straight out of a JSON configuration document, so
//! `max` is kept as a raw JSON value and validated when the cache is built.
//!
//! ## Capacity rules
//!
//! | `max`                         | Result                                  |
//! |-------------------------------|-----------------------------------------|
//! | non-negative integer          | that capacity                           |
//! | integral float (e.g. `5.0`)   | that capacity                           |
//! | `0`                           | zero-capacity (no-op) cache             |
//! | absent / `null`               | `ConfigError`                           |
//! | string, bool, array, object   | `ConfigError`                           |
//! | negative or fractional number | `ConfigError`                           |
//!
//! The lenient constructors report the `ConfigError` as a diagnostic and
//! fall back to [`DEFAULT_CAPACITY`].
//!
//! ## Example
//!
//! ```
//! use groupcache::options::{DEFAULT_CAPACITY, GroupCacheOptions};
//!
//! let opts: GroupCacheOptions = serde_json::from_str(r#"{ "max": 250 }"#).unwrap();
//! assert_eq!(opts.resolve_capacity(), Ok(250));
//!
//! let opts: GroupCacheOptions = serde_json::from_str(r#"{ "max": "foo" }"#).unwrap();
//! assert!(opts.resolve_capacity().is_err());
//! assert_eq!(opts.capacity_or_default(), DEFAULT_CAPACITY);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Capacity used when `max` is missing or malformed.
pub const DEFAULT_CAPACITY: usize = 100;

/// Options accepted when building a cache from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupCacheOptions {
    /// Maximum number of live entries.
    pub max: Option<Value>,
}

impl GroupCacheOptions {
    /// Options with `max` set to any JSON-convertible value.
    pub fn with_max(max: impl Into<Value>) -> Self {
        Self {
            max: Some(max.into()),
        }
    }

    /// Validates `max` and returns the capacity it describes.
    pub fn resolve_capacity(&self) -> Result<usize, ConfigError> {
        let max = match &self.max {
            None | Some(Value::Null) => return Err(ConfigError::new("max is not set")),
            Some(max) => max,
        };
        let Value::Number(number) = max else {
            return Err(ConfigError::new(format!(
                "max must be a non-negative integer, got {max}"
            )));
        };

        if let Some(n) = number.as_u64() {
            return usize::try_from(n)
                .map_err(|_| ConfigError::new(format!("max {n} does not fit in usize")));
        }
        if number.is_i64() {
            return Err(ConfigError::new(format!(
                "max must be non-negative, got {number}"
            )));
        }
        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < usize::MAX as f64 => {
                Ok(f as usize)
            },
            Some(f) if f < 0.0 => Err(ConfigError::new(format!(
                "max must be non-negative, got {number}"
            ))),
            _ => Err(ConfigError::new(format!(
                "max must be an integer, got {number}"
            ))),
        }
    }

    /// Resolved capacity, or [`DEFAULT_CAPACITY`] when `max` is invalid.
    pub fn capacity_or_default(&self) -> usize {
        self.resolve_capacity().unwrap_or(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_max_is_accepted() {
        assert_eq!(GroupCacheOptions::with_max(42).resolve_capacity(), Ok(42));
        assert_eq!(GroupCacheOptions::with_max(0).resolve_capacity(), Ok(0));
    }

    #[test]
    fn integral_float_max_is_accepted() {
        assert_eq!(GroupCacheOptions::with_max(5.0).resolve_capacity(), Ok(5));
    }

    #[test]
    fn missing_max_is_rejected() {
        let err = GroupCacheOptions::default().resolve_capacity().unwrap_err();
        assert_eq!(err.message(), "max is not set");

        let opts = GroupCacheOptions {
            max: Some(Value::Null),
        };
        assert!(opts.resolve_capacity().is_err());
    }

    #[test]
    fn non_numeric_max_is_rejected() {
        for max in [json!("foo"), json!(true), json!([1]), json!({ "n": 1 })] {
            let opts = GroupCacheOptions { max: Some(max) };
            assert!(opts.resolve_capacity().is_err(), "{opts:?}");
            assert_eq!(opts.capacity_or_default(), DEFAULT_CAPACITY);
        }
    }

    #[test]
    fn negative_max_is_rejected() {
        let err = GroupCacheOptions::with_max(-1).resolve_capacity().unwrap_err();
        assert!(err.message().contains("non-negative"));

        let err = GroupCacheOptions::with_max(-2.0).resolve_capacity().unwrap_err();
        assert!(err.message().contains("non-negative"));
    }

    #[test]
    fn fractional_max_is_rejected() {
        let err = GroupCacheOptions::with_max(2.5).resolve_capacity().unwrap_err();
        assert!(err.message().contains("integer"));
    }

    #[test]
    fn deserializes_from_config_document() {
        let opts: GroupCacheOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.max, None);

        let opts: GroupCacheOptions = serde_json::from_value(json!({ "max": 7 })).unwrap();
        assert_eq!(opts.capacity_or_default(), 7);
    }
}
