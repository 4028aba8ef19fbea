//! Operation counters for [`LruCache`](crate::policy::lru::LruCache).
//!
//! Compiled only with the `metrics` feature. Recording goes through the
//! traits in [`traits`]; reading goes through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider), which copies
//! the counters into a plain [`LruMetricsSnapshot`](snapshot::LruMetricsSnapshot).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
