//! Error types for assockit.
//!
//! Lookups never fail: a missing key is `None`. The two error types here cover
//! the remaining cases.
//!
//! - [`InvariantError`]: a structural check (`check_invariants`) found the
//!   tree, map, or list in an inconsistent state.
//! - [`ConfigError`]: a cache was configured with parameters outside their
//!   valid range.
//!
//! ## Example Usage
//!
//! ```
//! use assockit::error::ConfigError;
//! use assockit::policy::lru::LruCache;
//!
//! // Fallible constructor for user-supplied ratios
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_with_ratio(100, 0.75);
//! assert!(cache.is_ok());
//!
//! // Out-of-range ratios are reported instead of clamped
//! let bad = LruCache::<String, i32>::try_with_ratio(100, 1.5);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// A structural invariant did not hold.
///
/// Returned by `check_invariants` on
/// [`TernarySearchTree`](crate::ds::TernarySearchTree),
/// [`LinkedMap`](crate::ds::LinkedMap), and
/// [`IntrusiveList`](crate::ds::IntrusiveList). The message names the broken
/// link or count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Wraps a description of the failed check.
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

/// A cache parameter was out of range.
///
/// Produced by [`LruCache::try_with_ratio`](crate::policy::lru::LruCache::try_with_ratio)
/// and [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use assockit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_with_ratio(10, f64::NAN).unwrap_err();
/// assert!(err.to_string().contains("ratio"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Wraps a description of the rejected parameter.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

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
