//! Ternary search tree over decomposed string keys.
//!
//! Keys are split into units by a [`KeyIterator`] (characters or path
//! segments). Each node holds one unit and three child slots:
//!
//! ```text
//!                         ┌───────────┐
//!                         │ seg: "b"  │
//!                         └─┬───┬───┬─┘
//!           lesser ┌────────┘   │   └────────┐ greater
//!                  ▼            ▼            ▼
//!            ┌──────────┐ ┌──────────┐ ┌──────────┐
//!            │ seg: "a" │ │ seg: "e" │ │ seg: "c" │
//!            │ val: 1   │ │ val: 2   │ │          │
//!            └──────────┘ └──────────┘ └────┬─────┘
//!             key "a"      key "be"         │ continuation
//!                                      ┌──────────┐
//!                                      │ seg: "d" │  key "cd"
//!                                      │ val: 3   │
//!                                      └──────────┘
//! ```
//!
//! A unit that sorts before a node's segment goes `lesser`, one that sorts
//! after goes `greater`, and an equal unit either ends the key at this node or
//! continues with the next unit through `continuation`.
//!
//! Nodes live in a [`SlotArena`]; child links are `Option<SlotId>` slots owned
//! by exactly one parent. Deleting a key prunes every node left without a
//! value and without children, walking back up the recorded descent path.
//!
//! ## Traversal order
//!
//! [`iter`](TernarySearchTree::iter), [`for_each`](TernarySearchTree::for_each)
//! and [`find_superstr`](TernarySearchTree::find_superstr) visit the lesser
//! subtree, the node itself, the continuation subtree, then the greater
//! subtree. With [`StringIterator`] this is plain lexicographic key order; with
//! [`PathIterator`] it is segment-wise order with every path followed by its
//! descendants. Traversal uses an explicit stack, so deep trees cannot
//! overflow the call stack.
//!
//! The tree is not self-balancing. Inserting keys in sorted order degrades the
//! lesser/greater chains to linear depth.
//!
//! ## Example
//!
//! ```
//! use assockit::ds::TernarySearchTree;
//!
//! let mut tree = TernarySearchTree::for_paths();
//! tree.set("src/ds/mod.rs", 1);
//! tree.set("src/lib.rs", 2);
//!
//! assert_eq!(tree.get("src/lib.rs"), Some(&2));
//! assert_eq!(tree.find_substr("src/lib.rs/extra"), Some(&2));
//!
//! let mut under_src: Vec<_> = tree.find_superstr("src").unwrap().copied().collect();
//! under_src.sort();
//! assert_eq!(under_src, vec![1, 2]);
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;

use crate::ds::key_iter::{KeyIterator, PathIterator, StringIterator};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Tree keyed by path segments.
pub type PathTree<E> = TernarySearchTree<E, PathIterator>;

/// Tree keyed by characters.
pub type StringTree<E> = TernarySearchTree<E, StringIterator>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Lesser = 0,
    Continuation = 1,
    Greater = 2,
}

#[derive(Debug, Clone)]
struct Entry<E> {
    key: String,
    value: E,
}

#[derive(Debug, Clone)]
struct Node<E> {
    segment: String,
    entry: Option<Entry<E>>,
    children: [Option<SlotId>; 3],
}

impl<E> Node<E> {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_owned(),
            entry: None,
            children: [None; 3],
        }
    }

    #[inline]
    fn child(&self, branch: Branch) -> Option<SlotId> {
        self.children[branch as usize]
    }

    /// A node with no value and no children only exists to be pruned.
    fn is_empty(&self) -> bool {
        self.entry.is_none() && self.children.iter().all(Option::is_none)
    }
}

/// Picks the branch to follow from a node, consuming a unit on a match.
///
/// Returns `None` when the current unit matches and it is the key's last one.
#[inline]
fn step<I: KeyIterator>(iter: &mut I, segment: &str) -> Option<Branch> {
    match iter.compare(segment) {
        Ordering::Greater => Some(Branch::Lesser),
        Ordering::Less => Some(Branch::Greater),
        Ordering::Equal if iter.has_next() => {
            iter.advance();
            Some(Branch::Continuation)
        },
        Ordering::Equal => None,
    }
}

/// Search tree mapping string keys to elements of type `E`.
///
/// The key decomposition strategy `I` is fixed at construction; see
/// [`for_paths`](TernarySearchTree::for_paths),
/// [`for_strings`](TernarySearchTree::for_strings) and
/// [`with_iterator`](TernarySearchTree::with_iterator).
///
/// Lookups take `&self`; the key iterator sits behind a `RefCell` so its
/// buffer is reused. The tree is therefore `!Sync`.
#[derive(Clone)]
pub struct TernarySearchTree<E, I = PathIterator> {
    iter: RefCell<I>,
    nodes: SlotArena<Node<E>>,
    root: Option<SlotId>,
    len: usize,
}

impl<E> TernarySearchTree<E, PathIterator> {
    /// Creates a tree that decomposes keys into path segments.
    pub fn for_paths() -> Self {
        Self::with_iterator(PathIterator::new())
    }
}

impl<E> TernarySearchTree<E, StringIterator> {
    /// Creates a tree that decomposes keys into characters.
    pub fn for_strings() -> Self {
        Self::with_iterator(StringIterator::new())
    }
}

impl<E, I: KeyIterator> TernarySearchTree<E, I> {
    /// Creates a tree bound to the given decomposition strategy.
    pub fn with_iterator(iter: I) -> Self {
        Self {
            iter: RefCell::new(iter),
            nodes: SlotArena::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, including routing-only ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.len = 0;
    }

    /// Stores `element` under `key`, returning the element it replaced.
    ///
    /// Missing nodes along the key's path are created on the way down.
    pub fn set(&mut self, key: &str, element: E) -> Option<E> {
        let iter = self.iter.get_mut();
        iter.reset(key);

        let mut id = match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.insert(Node::new(iter.value()));
                self.root = Some(root);
                root
            },
        };

        while let Some(branch) = step(iter, &self.nodes[id].segment) {
            id = match self.nodes[id].child(branch) {
                Some(child) => child,
                None => {
                    let child = self.nodes.insert(Node::new(iter.value()));
                    self.nodes[id].children[branch as usize] = Some(child);
                    child
                },
            };
        }

        let previous = self.nodes[id]
            .entry
            .replace(Entry {
                key: key.to_owned(),
                value: element,
            })
            .map(|entry| entry.value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the element stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&E> {
        let id = self.find_node(key)?;
        self.nodes[id].entry.as_ref().map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut E> {
        let id = self.find_node(key)?;
        self.nodes[id].entry.as_mut().map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its element. Missing keys are a no-op.
    ///
    /// Nodes emptied by the removal are detached from their parents, walking
    /// up until the first ancestor that still routes or holds something.
    pub fn delete(&mut self, key: &str) -> Option<E> {
        let iter = self.iter.get_mut();
        iter.reset(key);

        let mut path: Vec<(SlotId, Branch)> = Vec::new();
        let mut current = self.root;
        let target = loop {
            let id = current?;
            match step(iter, &self.nodes[id].segment) {
                Some(branch) => {
                    path.push((id, branch));
                    current = self.nodes[id].child(branch);
                },
                None => break id,
            }
        };

        let removed = self.nodes[target].entry.take()?.value;
        self.len -= 1;
        self.prune(target, path);
        Some(removed)
    }

    fn prune(&mut self, mut id: SlotId, mut path: Vec<(SlotId, Branch)>) {
        let mut pruned = 0usize;
        while self.nodes[id].is_empty() {
            self.nodes.remove(id);
            pruned += 1;
            match path.pop() {
                Some((parent, branch)) => {
                    self.nodes[parent].children[branch as usize] = None;
                    id = parent;
                },
                None => {
                    self.root = None;
                    break;
                },
            }
        }
        if pruned > 0 {
            log::trace!("ternary tree pruned {} empty node(s)", pruned);
        }
    }

    /// Returns the element of the longest stored key that is a unit-wise
    /// prefix of `key` (including `key` itself).
    pub fn find_substr(&self, key: &str) -> Option<&E> {
        let mut iter = self.iter.borrow_mut();
        iter.reset(key);

        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            match step(&mut *iter, &node.segment) {
                Some(Branch::Continuation) => {
                    if let Some(entry) = &node.entry {
                        candidate = Some(&entry.value);
                    }
                    current = node.child(Branch::Continuation);
                },
                Some(branch) => current = node.child(branch),
                None => {
                    return node.entry.as_ref().map(|entry| &entry.value).or(candidate);
                },
            }
        }
        candidate
    }

    /// Enumerates the elements of every key that strictly extends `key`.
    ///
    /// Returns `None` unless `key` itself is stored or some stored key extends
    /// it. When `key` is stored but nothing extends it, the returned iterator
    /// is empty. The answer depends only on the stored keys, not on the order
    /// they were set or deleted in.
    pub fn find_superstr(&self, key: &str) -> Option<Values<'_, E>> {
        let node = &self.nodes[self.find_node(key)?];
        let below = node.child(Branch::Continuation);
        // A valueless node with no continuation only routes to siblings.
        if node.entry.is_none() && below.is_none() {
            return None;
        }
        Some(Values {
            inner: Iter::new(&self.nodes, below),
        })
    }

    /// Calls `f(element, key)` for every stored element in traversal order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&E, &str),
    {
        for (key, value) in self.iter() {
            f(value, key);
        }
    }

    /// Iterates `(key, element)` pairs in traversal order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.nodes, self.root)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> Values<'_, E> {
        Values { inner: self.iter() }
    }

    /// Descends along `key` without creating anything; returns the node where
    /// the key's last unit matched.
    fn find_node(&self, key: &str) -> Option<SlotId> {
        let mut iter = self.iter.borrow_mut();
        iter.reset(key);

        let mut current = self.root;
        while let Some(id) = current {
            match step(&mut *iter, &self.nodes[id].segment) {
                Some(branch) => current = self.nodes[id].child(branch),
                None => return Some(id),
            }
        }
        None
    }

    /// Verifies that every reachable node is non-empty, that stored keys route
    /// back to their own node, and that the arena holds no orphaned nodes.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut reachable = 0usize;
        let mut entries = 0usize;
        let mut stack: Vec<SlotId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling child slot {}", id.index())))?;
            reachable += 1;
            if reachable > self.nodes.len() {
                return Err(InvariantError::new("cycle detected in tree"));
            }
            if node.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty node with segment {:?} survived",
                    node.segment
                )));
            }
            if let Some(entry) = &node.entry {
                entries += 1;
                if self.find_node(&entry.key) != Some(id) {
                    return Err(InvariantError::new(format!(
                        "key {:?} does not route to its own node",
                        entry.key
                    )));
                }
            }
            stack.extend(node.children.iter().flatten().copied());
        }

        if entries != self.len {
            return Err(InvariantError::new(format!(
                "len is {} but {} entries are reachable",
                self.len, entries
            )));
        }
        if reachable != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable but arena holds {}",
                reachable,
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

impl<E, I: KeyIterator + Default> Default for TernarySearchTree<E, I> {
    fn default() -> Self {
        Self::with_iterator(I::default())
    }
}

impl<E: fmt::Debug, I: KeyIterator> fmt::Debug for TernarySearchTree<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, E, I: KeyIterator> Extend<(K, E)> for TernarySearchTree<E, I> {
    fn extend<T: IntoIterator<Item = (K, E)>>(&mut self, iter: T) {
        for (key, element) in iter {
            self.set(key.as_ref(), element);
        }
    }
}

impl<K: AsRef<str>, E, I: KeyIterator + Default> FromIterator<(K, E)> for TernarySearchTree<E, I> {
    fn from_iter<T: IntoIterator<Item = (K, E)>>(iter: T) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    Enter(SlotId),
    Emit(SlotId),
}

/// Iterator over `(key, element)` pairs of a [`TernarySearchTree`].
///
/// Single pass; create a new one to enumerate again.
pub struct Iter<'a, E> {
    nodes: &'a SlotArena<Node<E>>,
    stack: Vec<Frame>,
}

impl<'a, E> Iter<'a, E> {
    fn new(nodes: &'a SlotArena<Node<E>>, start: Option<SlotId>) -> Self {
        Self {
            nodes,
            stack: start.map(Frame::Enter).into_iter().collect(),
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = (&'a str, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Enter(id) => {
                    let node = &nodes[id];
                    // Pushed in reverse so the lesser subtree pops first.
                    self.stack.extend(node.child(Branch::Greater).map(Frame::Enter));
                    self.stack
                        .extend(node.child(Branch::Continuation).map(Frame::Enter));
                    self.stack.push(Frame::Emit(id));
                    self.stack.extend(node.child(Branch::Lesser).map(Frame::Enter));
                },
                Frame::Emit(id) => {
                    if let Some(entry) = &nodes[id].entry {
                        return Some((entry.key.as_str(), &entry.value));
                    }
                },
            }
        }
        None
    }
}

/// Iterator over the elements of a [`TernarySearchTree`] or of one of its
/// subtrees, as returned by [`find_superstr`](TernarySearchTree::find_superstr).
pub struct Values<'a, E> {
    inner: Iter<'a, E>,
}

impl<'a, E> Iterator for Values<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}
