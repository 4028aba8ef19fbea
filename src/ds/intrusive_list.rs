//! Doubly linked list whose nodes live in a [`SlotArena`].
//!
//! [`LinkedMap`](crate::ds::LinkedMap) keeps its entries here and remembers
//! each entry's [`SlotId`] in its hash index. An id stays valid until the
//! entry is removed, so reordering an entry never touches the index.
//!
//! ```text
//!   head (oldest)                                  tail (newest)
//!      │                                                │
//!      ▼                                                ▼
//!   [id_4] ◄──► [id_1] ◄──► [id_7] ◄──► ... ◄──► [id_2]
//!
//!   each arena slot: Link { value, prev, next }
//! ```
//!
//! Pushing, unlinking and relinking at either end are O(1); walking the chain
//! is O(n).

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

#[derive(Debug, Clone)]
struct Link<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed list addressed by [`SlotId`].
#[derive(Debug, Clone)]
pub struct IntrusiveList<T> {
    links: SlotArena<Link<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Value at the head (the end `push_front` writes to).
    pub fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    /// Value at the tail (the end `push_back` writes to).
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.links.get(id).map(|link| &link.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.links.get_mut(id).map(|link| &mut link.value)
    }

    /// Values from head to tail.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            entries: self.iter_entries(),
            remaining: self.len(),
        }
    }

    /// `(SlotId, &T)` pairs from head to tail.
    pub fn iter_entries(&self) -> Entries<'_, T> {
        Entries {
            links: &self.links,
            cursor: self.head,
        }
    }

    pub fn push_front(&mut self, value: T) -> SlotId {
        self.push(value, End::Front)
    }

    pub fn push_back(&mut self, value: T) -> SlotId {
        self.push(value, End::Back)
    }

    /// Removes the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(self.head?)
    }

    /// Unlinks `id` and frees its slot.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.links.remove(id).map(|link| link.value)
    }

    /// Relinks `id` at the head; `false` if `id` is not in the list.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        self.relink(id, End::Front)
    }

    /// Relinks `id` at the tail; `false` if `id` is not in the list.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        self.relink(id, End::Back)
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    fn push(&mut self, value: T, end: End) -> SlotId {
        let id = self.links.insert(Link {
            value,
            prev: None,
            next: None,
        });
        self.link(id, end);
        id
    }

    fn relink(&mut self, id: SlotId, end: End) -> bool {
        let at_end = match end {
            End::Front => self.head == Some(id),
            End::Back => self.tail == Some(id),
        };
        if at_end {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link(id, end);
        true
    }

    /// Splices a detached slot in at `end`.
    fn link(&mut self, id: SlotId, end: End) {
        let neighbour = match end {
            End::Front => self.head,
            End::Back => self.tail,
        };
        if let Some(link) = self.links.get_mut(id) {
            match end {
                End::Front => {
                    link.prev = None;
                    link.next = neighbour;
                },
                End::Back => {
                    link.prev = neighbour;
                    link.next = None;
                },
            }
        }
        match neighbour.and_then(|n| self.links.get_mut(n)) {
            Some(link) => match end {
                End::Front => link.prev = Some(id),
                End::Back => link.next = Some(id),
            },
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            },
        }
        match end {
            End::Front => self.head = Some(id),
            End::Back => self.tail = Some(id),
        }
    }

    /// Detaches `id` from its neighbours without freeing the slot.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let link = self.links.get_mut(id)?;
        let prev = link.prev.take();
        let next = link.next.take();

        match prev.and_then(|p| self.links.get_mut(p)) {
            Some(link) => link.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.links.get_mut(n)) {
            Some(link) => link.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    /// Walks the chain and verifies head/tail, back-links and node count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match (self.head, self.tail) {
            (None, None) if self.links.is_empty() => return Ok(()),
            (None, None) => {
                return Err(InvariantError::new(format!(
                    "list has no head but holds {} links",
                    self.links.len()
                )));
            },
            (Some(_), None) | (None, Some(_)) => {
                return Err(InvariantError::new("exactly one of head/tail is set"));
            },
            (Some(_), Some(_)) => {},
        }

        let mut walked = 0usize;
        let mut expected_prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let link = self
                .links
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", id.index())))?;
            if link.prev != expected_prev {
                return Err(InvariantError::new(format!(
                    "slot {} points back to {:?}, expected {:?}",
                    id.index(),
                    link.prev,
                    expected_prev
                )));
            }
            walked += 1;
            if walked > self.len() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            expected_prev = Some(id);
            cursor = link.next;
        }

        if expected_prev != self.tail {
            return Err(InvariantError::new("chain ends before tail"));
        }
        if walked != self.len() {
            return Err(InvariantError::new(format!(
                "chain length {walked} does not match {} stored links",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(SlotId, &T)` from head to tail.
pub struct Entries<'a, T> {
    links: &'a SlotArena<Link<T>>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let link = self.links.get(id)?;
        self.cursor = link.next;
        Some((id, &link.value))
    }
}

pub struct IntrusiveListIter<'a, T> {
    entries: Entries<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntrusiveListIter<'_, T> {}
