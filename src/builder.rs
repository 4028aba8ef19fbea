//! Builder for [`LruCache`].
//!
//! ## Example
//!
//! ```rust
//! use assockit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).ratio(0.75).build::<u64, String>();
//! cache.set(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.ratio(), 0.75);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Collects cache settings before construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheBuilder {
    limit: usize,
    ratio: f64,
}

impl CacheBuilder {
    /// Starts a builder with the given entry limit and a ratio of 1.0.
    pub fn new(limit: usize) -> Self {
        Self { limit, ratio: 1.0 }
    }

    /// Fraction of `limit` retained after an overflow trim.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Builds the cache, rejecting a ratio outside `[0.0, 1.0]`.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_with_ratio(self.limit, self.ratio)
    }

    /// Builds the cache, clamping an out-of-range ratio.
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::with_ratio(self.limit, self.ratio)
    }
}
