//! Hash map that remembers an order over its entries.
//!
//! `LinkedMap` pairs an `FxHashMap<K, SlotId>` index with an
//! [`IntrusiveList`] holding the entries. The list order is insertion order by
//! default; [`Touch`] moves an entry to either end on access, which is how
//! [`LruCache`](crate::policy::lru::LruCache) keeps recency order.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, SlotId>           list: IntrusiveList<Item<K, V>>
//!   ┌──────┬────────┐
//!   │ "a"  │ id_1 ──┼──────►  head ─► [a: 1] ◄──► [b: 2] ◄──► [c: 3] ◄── tail
//!   │ "b"  │ id_2 ──┼──────────────────────┘                │
//!   │ "c"  │ id_3 ──┼───────────────────────────────────────┘
//!   └──────┴────────┘        oldest                        newest
//! ```
//!
//! ## Touch semantics
//!
//! | Touch    | existing entry            | new entry (`set`) |
//! |----------|---------------------------|-------------------|
//! | `None`   | position unchanged        | appended at tail  |
//! | `AsOld`  | moved to head             | inserted at head  |
//! | `AsNew`  | moved to tail             | appended at tail  |
//!
//! All keyed operations are O(1) on average; [`trim_old`](LinkedMap::trim_old)
//! is O(number of evicted entries).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Where an accessed entry moves in the map's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Touch {
    /// Leave the entry where it is.
    #[default]
    None,
    /// Move the entry to the head (oldest end).
    AsOld,
    /// Move the entry to the tail (newest end).
    AsNew,
}

#[derive(Debug, Clone)]
struct Item<K, V> {
    key: K,
    value: V,
}

/// Ordered map with O(1) reordering.
///
/// # Example
///
/// ```
/// use assockit::ds::{LinkedMap, Touch};
///
/// let mut map = LinkedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
/// map.set("c", 3);
///
/// map.get_with_touch(&"a", Touch::AsNew);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "c", "a"]);
///
/// assert_eq!(map.shift(), Some(2));
/// assert_eq!(map.to_pairs(), vec![("c", 3), ("a", 1)]);
/// ```
#[derive(Clone)]
pub struct LinkedMap<K, V> {
    map: FxHashMap<K, SlotId>,
    list: IntrusiveList<Item<K, V>>,
}

impl<K, V> LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            list: IntrusiveList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the value for `key` without changing its position.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.map.get(key)?;
        self.list.get(id).map(|item| &item.value)
    }

    /// Returns the value for `key`, repositioning it according to `touch`.
    pub fn get_with_touch<Q>(&mut self, key: &Q, touch: Touch) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.map.get(key)?;
        self.apply_touch(id, touch);
        self.list.get(id).map(|item| &item.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.map.get(key)?;
        self.list.get_mut(id).map(|item| &mut item.value)
    }

    /// Repositions `key` without reading it; returns `false` if absent.
    pub fn touch<Q>(&mut self, key: &Q, touch: Touch) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(key) {
            Some(&id) => {
                self.apply_touch(id, touch);
                true
            },
            None => false,
        }
    }

    /// Inserts or updates `key` without reordering existing entries.
    ///
    /// New keys are appended at the tail. Returns the replaced value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.set_with_touch(key, value, Touch::None)
    }

    /// Inserts or updates `key`, applying `touch` to its position.
    ///
    /// A new key is inserted at the head for [`Touch::AsOld`] and at the tail
    /// otherwise. Returns the replaced value.
    pub fn set_with_touch(&mut self, key: K, value: V, touch: Touch) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            if let Some(item) = self.list.get_mut(id) {
                let old = mem::replace(&mut item.value, value);
                self.apply_touch(id, touch);
                return Some(old);
            }
        }

        let item = Item {
            key: key.clone(),
            value,
        };
        let id = match touch {
            Touch::AsOld => self.list.push_front(item),
            Touch::None | Touch::AsNew => self.list.push_back(item),
        };
        self.map.insert(key, id);
        None
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.map.remove(key)?;
        self.list.remove(id).map(|item| item.value)
    }

    /// Removes the head (oldest) entry and returns its value.
    pub fn shift(&mut self) -> Option<V> {
        self.shift_entry().map(|(_, value)| value)
    }

    /// Removes the head (oldest) entry and returns it.
    pub fn shift_entry(&mut self) -> Option<(K, V)> {
        let item = self.list.pop_front()?;
        self.map.remove(&item.key);
        Some((item.key, item.value))
    }

    /// The head (oldest) entry.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.list.front().map(|item| (&item.key, &item.value))
    }

    /// The tail (newest) entry.
    pub fn peek_newest(&self) -> Option<(&K, &V)> {
        self.list.back().map(|item| (&item.key, &item.value))
    }

    /// Zero-based position of `key` counted from the head. O(n).
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let target = *self.map.get(key)?;
        self.list.iter_entries().position(|(id, _)| id == target)
    }

    /// Drops entries from the head until at most `new_size` remain.
    ///
    /// Returns the number of entries dropped.
    pub fn trim_old(&mut self, new_size: usize) -> usize {
        let len = self.len();
        if new_size >= len {
            return 0;
        }
        if new_size == 0 {
            self.clear();
            return len;
        }
        while self.len() > new_size {
            if self.shift_entry().is_none() {
                break;
            }
        }
        len - self.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Iterates `(key, value)` from head to tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Calls `f(value, key)` for each entry from head to tail.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self.iter() {
            f(value, key);
        }
    }

    /// Snapshot of the entries as ordered pairs, head first.
    pub fn to_pairs(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Replaces the contents with `pairs`, preserving their order.
    pub fn from_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Checks that index and list agree and the list is well linked.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        for (id, item) in self.list.iter_entries() {
            if self.map.get(&item.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index entry for slot {} points elsewhere",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn apply_touch(&mut self, id: SlotId, touch: Touch) {
        match touch {
            Touch::None => {},
            Touch::AsOld => {
                self.list.move_to_front(id);
            },
            Touch::AsNew => {
                self.list.move_to_back(id);
            },
        }
    }
}

impl<K, V> Default for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LinkedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over a [`LinkedMap`].
pub struct Iter<'a, K, V> {
    inner: IntrusiveListIter<'a, Item<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| (&item.key, &item.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

// --- Serde: ordered sequence of [key, value] pairs ---

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;
    use std::hash::Hash;
    use std::marker::PhantomData;

    use serde::de::{SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::LinkedMap;

    impl<K, V> Serialize for LinkedMap<K, V>
    where
        K: Eq + Hash + Clone + Serialize,
        V: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for entry in self.iter() {
                seq.serialize_element(&entry)?;
            }
            seq.end()
        }
    }

    impl<'de, K, V> Deserialize<'de> for LinkedMap<K, V>
    where
        K: Eq + Hash + Clone + Deserialize<'de>,
        V: Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct PairsVisitor<K, V>(PhantomData<(K, V)>);

            impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
            where
                K: Eq + Hash + Clone + Deserialize<'de>,
                V: Deserialize<'de>,
            {
                type Value = LinkedMap<K, V>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of [key, value] pairs")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    // Replaying `set` in sequence order rebuilds the same order.
                    let mut map = LinkedMap::with_capacity(seq.size_hint().unwrap_or(0));
                    while let Some((key, value)) = seq.next_element::<(K, V)>()? {
                        map.set(key, value);
                    }
                    Ok(map)
                }
            }

            deserializer.deserialize_seq(PairsVisitor(PhantomData))
        }
    }
}
