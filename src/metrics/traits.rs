//! # Metrics Traits
//!
//! Recording and reading are separate concerns: the cache only writes through
//! the recorder traits, and tests or benches only read through
//! [`MetricsSnapshotProvider`].
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   &mut self, hit/miss/insert/evict
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐    ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │    │   LruMetricsReadRecorder    │
//!   │  pop_lru/touch/trim/limit   │    │  peek/peek_lru/recency_rank │
//!   └─────────────────────────────┘    │  (&self, interior cells)    │
//!                                      └─────────────────────────────┘
//!
//!   Consumption:
//!   ┌─────────────────────────────┐    ┌─────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>  │    │        MetricsReset         │
//!   └─────────────────────────────┘    └─────────────────────────────┘
//! ```

/// Counters shared by any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entries(&mut self, count: u64);
    fn record_clear(&mut self);
}

/// LRU-specific counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_reconfigure(&mut self);
}

/// LRU counters recorded from `&self` methods (interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_hit(&self);
    fn record_peek_miss(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
}

/// Snapshot provider for benches and tests.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
