pub use crate::builder::CacheBuilder;
pub use crate::ds::{
    KeyIterator, LinkedMap, PathIterator, PathTree, StringIterator, StringTree,
    TernarySearchTree, Touch,
};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
