//! # Bounded Least Recently Used (LRU) Cache
//!
//! [`LruCache`] is a [`LinkedMap`] kept in recency order plus two settings:
//! a `limit` on the entry count and a `ratio` saying what fraction of the
//! limit survives a trim.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   limit: usize            ratio: f64 (0.0 ..= 1.0)               │
//!   │                                                                  │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │                    LinkedMap<K, V>                         │ │
//!   │   │                                                            │ │
//!   │   │  head ──► [A] ◄──► [B] ◄──► [C] ◄──► [D] ◄── tail          │ │
//!   │   │   (LRU)                                  (MRU)             │ │
//!   │   └────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   set(E) with limit = 4, ratio = 0.5
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   Before:   head ──► [A] ◄──► [B] ◄──► [C] ◄──► [D] ◄── tail
//!
//!   1. Append [E] at tail (AsNew)      len = 5 > limit
//!   2. trim_old(round(4 * 0.5) = 2)    drops A, B, C from head
//!
//!   After:    head ──► [D] ◄──► [E] ◄── tail
//!
//!   get(D): moves [D] to tail          head ──► [E] ◄──► [D] ◄── tail
//!   peek(E): order unchanged
//! ```
//!
//! A ratio below 1.0 makes overflow trims batchy: instead of evicting one
//! entry per insert once full, the cache drops down to `limit * ratio` and
//! then refills.
//!
//! ## Logging
//!
//! Trims are reported at `debug` level through the `log` facade, along with
//! changes to `limit` and `ratio`.
//!
//! ## Example
//!
//! ```
//! use assockit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.set("k1", 1);
//! cache.set("k2", 2);
//! cache.get("k1");
//! cache.set("k3", 3);
//!
//! assert!(cache.contains_key("k1"));
//! assert!(!cache.contains_key("k2"));
//! assert!(cache.contains_key("k3"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use log::debug;

use crate::ds::linked_map::{Iter, LinkedMap, Touch};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Size-bounded cache that evicts least recently used entries.
///
/// `get` and `set` mark an entry most recently used; `peek` and
/// `contains_key` do not. Whenever the entry count exceeds `limit` the
/// oldest entries are dropped until `round(limit * ratio)` remain.
#[derive(Clone)]
pub struct LruCache<K, V> {
    map: LinkedMap<K, V>,
    limit: usize,
    ratio: f64,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache that keeps at most `limit` entries and trims one at a
    /// time (ratio 1.0).
    ///
    /// A limit of 0 is accepted; such a cache drops every entry on insert.
    #[inline]
    pub fn new(limit: usize) -> Self {
        Self::with_ratio(limit, 1.0)
    }

    /// Creates a cache with a custom trim ratio, clamped to `[0.0, 1.0]`.
    ///
    /// NaN is treated as 0.0.
    ///
    /// ```
    /// use assockit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::with_ratio(10, 7.5);
    /// assert_eq!(cache.ratio(), 1.0);
    /// ```
    pub fn with_ratio(limit: usize, ratio: f64) -> Self {
        Self {
            map: LinkedMap::new(),
            limit,
            ratio: clamp_ratio(ratio),
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Like [`with_ratio`](Self::with_ratio), but rejects a ratio outside
    /// `[0.0, 1.0]` instead of clamping it.
    pub fn try_with_ratio(limit: usize, ratio: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::new(format!(
                "ratio must be within [0.0, 1.0], got {ratio}"
            )));
        }
        Ok(Self::with_ratio(limit, ratio))
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Changes the limit, trimming immediately if the cache is over it.
    pub fn set_limit(&mut self, limit: usize) {
        debug!("lru limit changed from {} to {}", self.limit, limit);
        self.limit = limit;
        #[cfg(feature = "metrics")]
        self.metrics.record_reconfigure();
        self.trim_if_needed();
    }

    /// Changes the trim ratio (clamped, NaN as 0.0) and re-checks the limit.
    pub fn set_ratio(&mut self, ratio: f64) {
        let ratio = clamp_ratio(ratio);
        debug!("lru ratio changed from {} to {}", self.ratio, ratio);
        self.ratio = ratio;
        #[cfg(feature = "metrics")]
        self.metrics.record_reconfigure();
        self.trim_if_needed();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Membership test; does not affect recency.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the value and marks the entry most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.map.get_with_touch(key, Touch::AsNew);
        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        value
    }

    /// Mutable access; counts as a use like [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.map.touch(key, Touch::AsNew);
        #[cfg(feature = "metrics")]
        if found {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        if !found {
            return None;
        }
        self.map.get_mut(key)
    }

    /// Returns the value without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.map.get(key);
        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_hit();
        } else {
            (&self.metrics).record_peek_miss();
        }
        value
    }

    /// Inserts or updates `key` as most recently used, then trims on overflow.
    ///
    /// Returns the previous value. If the trim evicts the key just written
    /// (limit 0, or ratio 0), it is gone after the call.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let previous = self.map.set_with_touch(key, value, Touch::AsNew);

        #[cfg(feature = "metrics")]
        if previous.is_some() {
            self.metrics.record_insert_update();
        } else {
            self.metrics.record_insert_new();
        }

        self.trim_if_needed();
        previous
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let removed = self.map.remove(key);
        #[cfg(feature = "metrics")]
        if removed.is_some() {
            self.metrics.record_remove_found();
        }
        removed
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes the least recently used entry and returns its value.
    pub fn shift(&mut self) -> Option<V> {
        self.map.shift()
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
    }

    /// Iterates from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.map.values()
    }

    /// Entries as pairs, least recently used first.
    pub fn to_pairs(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.map.to_pairs()
    }

    /// Replaces the contents with `pairs`, the last pair being most recent.
    ///
    /// Limit and ratio are kept; an oversized input is trimmed once loaded.
    pub fn from_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.map.from_pairs(pairs);
        self.trim_if_needed();
    }

    /// Read-only view of the underlying ordered map.
    pub fn as_linked_map(&self) -> &LinkedMap<K, V> {
        &self.map
    }

    /// Checks the underlying map and that the cache is within its limit.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.map.check_invariants()?;
        if self.map.len() > self.limit {
            return Err(InvariantError::new(format!(
                "cache holds {} entries over limit {}",
                self.map.len(),
                self.limit
            )));
        }
        Ok(())
    }

    fn retained_size(&self) -> usize {
        let target = (self.limit as f64 * self.ratio).round() as usize;
        target.min(self.limit)
    }

    fn trim_if_needed(&mut self) {
        if self.map.len() <= self.limit {
            return;
        }
        let target = self.retained_size();
        let evicted = self.map.trim_old(target);
        debug!(
            "lru trim: limit={} ratio={} evicted={} remaining={}",
            self.limit,
            self.ratio,
            evicted,
            self.map.len()
        );
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_call();
            self.metrics.record_evicted_entries(evicted as u64);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.to_snapshot(self.map.len(), self.limit)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics = LruMetrics::default();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("limit", &self.limit)
            .field("ratio", &self.ratio)
            .field("entries", &self.map)
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::set(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.limit
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();
        let entry = self.map.shift_entry();
        #[cfg(feature = "metrics")]
        if entry.is_some() {
            self.metrics.record_pop_lru_found();
        }
        entry
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();
        let entry = self.map.peek_oldest();
        #[cfg(feature = "metrics")]
        if entry.is_some() {
            (&self.metrics).record_peek_lru_found();
        }
        entry
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();
        let found = self.map.touch(key, Touch::AsNew);
        #[cfg(feature = "metrics")]
        if found {
            self.metrics.record_touch_found();
        }
        found
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();
        let position = self.map.position(key)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_found();
        Some(self.map.len() - 1 - position)
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for LruCache<K, V>
where
    K: Eq + Hash + Clone + serde::Serialize,
    V: serde::Serialize,
{
    /// Serializes the entries only, as `[key, value]` pairs oldest first.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.map, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(cache: &LruCache<&'static str, i32>) -> Vec<&'static str> {
        cache.keys().copied().collect()
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn new_cache_defaults() {
                let cache: LruCache<i32, i32> = LruCache::new(5);
                assert_eq!(cache.limit(), 5);
                assert_eq!(cache.ratio(), 1.0);
                assert!(cache.is_empty());
                assert_eq!(CoreCache::capacity(&cache), 5);
            }

            #[test]
            fn get_promotes_and_set_evicts_lru() {
                let mut cache = LruCache::new(2);
                cache.set("k1", 1);
                cache.set("k2", 2);
                assert_eq!(cache.get("k1"), Some(&1));
                cache.set("k3", 3);

                assert_eq!(keys_of(&cache), vec!["k1", "k3"]);
                assert!(!cache.contains_key("k2"));
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn linked_map_view_reflects_recency_order() {
                let mut cache = LruCache::new(3);
                cache.set("k1", 1);
                cache.set("k2", 2);
                cache.set("k3", 3);
                cache.get("k1");

                let view = cache.as_linked_map();
                assert_eq!(view.len(), 3);
                assert_eq!(view.peek_oldest(), Some((&"k2", &2)));
                assert_eq!(view.peek_newest(), Some((&"k1", &1)));
                assert_eq!(view.position("k3"), Some(1));
                assert!(view.check_invariants().is_ok());
            }

            #[test]
            fn peek_does_not_promote() {
                let mut cache = LruCache::new(2);
                cache.set("k1", 1);
                cache.set("k2", 2);
                assert_eq!(cache.peek("k1"), Some(&1));
                cache.set("k3", 3);

                assert_eq!(keys_of(&cache), vec!["k2", "k3"]);
            }

            #[test]
            fn set_existing_promotes_and_returns_previous() {
                let mut cache = LruCache::new(3);
                cache.set("a", 1);
                cache.set("b", 2);
                assert_eq!(cache.set("a", 10), Some(1));
                assert_eq!(keys_of(&cache), vec!["b", "a"]);
                assert_eq!(cache.peek("a"), Some(&10));
            }

            #[test]
            fn get_mut_promotes() {
                let mut cache = LruCache::new(3);
                cache.set("a", 1);
                cache.set("b", 2);
                if let Some(value) = cache.get_mut("a") {
                    *value = 5;
                }
                assert_eq!(cache.get_mut("missing"), None);
                assert_eq!(cache.to_pairs(), vec![("b", 2), ("a", 5)]);
            }

            #[test]
            fn remove_delete_shift() {
                let mut cache = LruCache::new(4);
                cache.extend([("a", 1), ("b", 2), ("c", 3)]);
                assert_eq!(cache.remove("b"), Some(2));
                assert!(!cache.delete("b"));
                assert!(cache.delete("c"));
                assert_eq!(cache.shift(), Some(1));
                assert_eq!(cache.shift(), None);
                assert!(cache.is_empty());
            }

            #[test]
            fn string_keys_lookup_by_str() {
                let mut cache: LruCache<String, u32> = LruCache::new(4);
                cache.set("alpha".to_string(), 1);
                assert_eq!(cache.get("alpha"), Some(&1));
                assert!(cache.contains_key("alpha"));
            }
        }

        mod trimming {
            use super::*;

            #[test]
            fn ratio_trims_in_batches() {
                let mut cache = LruCache::with_ratio(4, 0.5);
                for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
                    cache.set(key, i as i32);
                }
                assert_eq!(cache.len(), 4);

                cache.set("e", 4);
                assert_eq!(keys_of(&cache), vec!["d", "e"]);
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn ratio_rounds_half_away_from_zero() {
                let mut cache = LruCache::with_ratio(5, 0.5);
                for i in 0..6 {
                    cache.set(i, i);
                }
                // round(2.5) == 3
                assert_eq!(cache.len(), 3);
                assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
            }

            #[test]
            fn zero_limit_keeps_nothing() {
                let mut cache = LruCache::new(0);
                assert_eq!(cache.set("a", 1), None);
                assert!(cache.is_empty());
                assert_eq!(cache.get("a"), None);
            }

            #[test]
            fn zero_ratio_clears_on_overflow() {
                let mut cache = LruCache::with_ratio(2, 0.0);
                cache.set("a", 1);
                cache.set("b", 2);
                cache.set("c", 3);
                assert!(cache.is_empty());
            }

            #[test]
            fn shrinking_limit_trims_immediately() {
                let mut cache = LruCache::new(5);
                cache.extend([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
                cache.set_limit(2);
                assert_eq!(keys_of(&cache), vec!["c", "d"]);

                cache.set_limit(10);
                assert_eq!(cache.len(), 2);
            }

            #[test]
            fn set_ratio_clamps_and_rechecks() {
                let mut cache = LruCache::new(4);
                cache.set_ratio(-3.0);
                assert_eq!(cache.ratio(), 0.0);
                cache.set_ratio(2.0);
                assert_eq!(cache.ratio(), 1.0);
                cache.set_ratio(f64::NAN);
                assert_eq!(cache.ratio(), 0.0);

                cache.set_ratio(0.5);
                cache.extend([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
                cache.set_limit(3);
                // over limit 3, trimmed down to round(1.5) == 2
                assert_eq!(keys_of(&cache), vec!["c", "d"]);
            }

            #[test]
            fn from_pairs_replaces_and_trims() {
                let mut cache = LruCache::new(2);
                cache.set("old", 0);
                cache.from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]);
                assert_eq!(cache.to_pairs(), vec![("b", 2), ("c", 3)]);
            }
        }

        mod configuration {
            use super::*;

            #[test]
            fn try_with_ratio_validates() {
                assert!(LruCache::<u8, u8>::try_with_ratio(4, 0.0).is_ok());
                assert!(LruCache::<u8, u8>::try_with_ratio(4, 1.0).is_ok());

                let err = LruCache::<u8, u8>::try_with_ratio(4, 1.01).unwrap_err();
                assert!(err.message().contains("ratio"));
                assert!(LruCache::<u8, u8>::try_with_ratio(4, -0.1).is_err());
                assert!(LruCache::<u8, u8>::try_with_ratio(4, f64::NAN).is_err());
            }

            #[test]
            fn debug_shows_settings_and_entries() {
                let mut cache = LruCache::with_ratio(3, 0.5);
                cache.set("a", 1);
                let dbg = format!("{:?}", cache);
                assert_eq!(dbg, r#"LruCache { limit: 3, ratio: 0.5, entries: {"a": 1} }"#);
            }
        }

        mod trait_impls {
            use super::*;

            #[test]
            fn recency_rank_counts_from_most_recent() {
                let mut cache = LruCache::new(5);
                cache.extend([(1, "a"), (2, "b"), (3, "c")]);
                assert_eq!(cache.recency_rank(&3), Some(0));
                assert_eq!(cache.recency_rank(&1), Some(2));
                LruCache::get(&mut cache, &1);
                assert_eq!(cache.recency_rank(&1), Some(0));
                assert_eq!(cache.recency_rank(&2), Some(2));
                assert_eq!(cache.recency_rank(&9), None);
            }

            #[test]
            fn pop_and_peek_lru() {
                let mut cache = LruCache::new(5);
                cache.extend([(1, "a"), (2, "b")]);
                assert_eq!(cache.peek_lru(), Some((&1, &"a")));
                assert!(LruCacheTrait::touch(&mut cache, &1));
                assert_eq!(cache.pop_lru(), Some((2, "b")));
                assert_eq!(cache.pop_lru(), Some((1, "a")));
                assert_eq!(cache.pop_lru(), None);
                assert!(!LruCacheTrait::touch(&mut cache, &1));
            }

            #[test]
            fn generic_core_cache_usage() {
                fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
                    for i in 0..n {
                        cache.insert(i, i * 2);
                    }
                }
                let mut cache = LruCache::new(3);
                fill(&mut cache, 10);
                assert_eq!(CoreCache::len(&cache), 3);
                assert!(CoreCache::contains(&cache, &9));
                assert!(!CoreCache::contains(&cache, &0));
                assert_eq!(CoreCache::get(&mut cache, &8), Some(&16));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_hits_misses_and_evictions() {
            let mut cache = LruCache::new(2);
            cache.set("a", 1);
            cache.set("b", 2);
            cache.set("a", 3);
            cache.get("a");
            cache.get("zz");
            cache.peek("b");
            cache.set("c", 4);

            let snap = cache.snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.peek_hits, 1);
            assert_eq!(snap.evict_calls, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.limit, 2);

            cache.reset_metrics();
            assert_eq!(cache.snapshot().insert_calls, 0);
        }
    }

    // ==============================================
    // PROPERTY TESTS MODULE
    // ==============================================
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Size never exceeds the limit after any sequence of writes.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_len_bounded_by_limit(
                limit in 0usize..12,
                ratio in 0.0f64..=1.0,
                ops in prop::collection::vec((0u8..24, any::<bool>()), 0..200)
            ) {
                let mut cache = LruCache::with_ratio(limit, ratio);
                for (key, read) in ops {
                    if read {
                        cache.get(&key);
                    } else {
                        cache.set(key, key as u32);
                    }
                    prop_assert!(cache.len() <= limit);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            /// With ratio 1.0 the cache matches a textbook LRU model.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_lru_model(
                limit in 1usize..8,
                ops in prop::collection::vec((0u8..16, any::<bool>()), 0..200)
            ) {
                let mut cache = LruCache::new(limit);
                let mut model: Vec<u8> = Vec::new();
                for (key, read) in ops {
                    let pos = model.iter().position(|k| *k == key);
                    if read {
                        prop_assert_eq!(cache.get(&key).is_some(), pos.is_some());
                        if let Some(pos) = pos {
                            model.remove(pos);
                            model.push(key);
                        }
                    } else {
                        cache.set(key, key as u32);
                        if let Some(pos) = pos {
                            model.remove(pos);
                        }
                        model.push(key);
                        if model.len() > limit {
                            model.remove(0);
                        }
                    }
                    prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.clone());
                }
            }
        }
    }
}
