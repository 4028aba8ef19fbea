//! assockit: key-decomposing search trees, an ordered linked map, and a
//! bounded LRU cache built on it.
//!
//! - [`ds::TernarySearchTree`]: exact, longest-prefix and extension lookups
//!   over keys split into characters or path segments.
//! - [`ds::LinkedMap`]: hash map with insertion or recency order and O(1)
//!   reordering.
//! - [`policy::lru::LruCache`]: `LinkedMap` bounded by a limit and a trim ratio.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
