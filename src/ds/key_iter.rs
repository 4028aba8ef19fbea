//! Key decomposition strategies for [`TernarySearchTree`](crate::ds::TernarySearchTree).
//!
//! A [`KeyIterator`] walks a string key one *unit* at a time. The tree stores
//! one unit per node and compares the iterator's current unit against the
//! node's segment to decide whether to branch lesser, greater, or continue
//! down the key.
//!
//! ```text
//!   StringIterator  "abc"        ──► "a" ─► "b" ─► "c"
//!   PathIterator    "/usr//lib/" ──► "usr" ─► "lib"
//! ```
//!
//! Iterators are stateful and reused across calls: [`reset`](KeyIterator::reset)
//! copies the key into an internal buffer whose allocation is kept, so a warm
//! iterator decomposes new keys without allocating.
//!
//! Calling any other method before the first `reset` observes the empty key.
//! The tree always resets before walking, so this never leaks through its API.

use std::cmp::Ordering;

/// Strategy that splits a key into an ordered sequence of comparable units.
///
/// Implement this to add a new decomposition; the tree only relies on these
/// five methods.
pub trait KeyIterator {
    /// Starts decomposing `key`, positioned on its first unit.
    fn reset(&mut self, key: &str) -> &mut Self;

    /// Moves to the following unit.
    fn advance(&mut self) -> &mut Self;

    /// Returns `true` while at least one unit follows the current one.
    fn has_next(&self) -> bool;

    /// The current unit.
    fn value(&self) -> &str;

    /// Compares a caller-supplied unit against the current unit.
    ///
    /// `Less` means `segment` sorts before the current unit, `Greater` after.
    fn compare(&self, segment: &str) -> Ordering {
        segment.cmp(self.value())
    }
}

/// Decomposes a key into single characters.
#[derive(Debug, Clone, Default)]
pub struct StringIterator {
    value: String,
    pos: usize,
    end: usize,
}

impl StringIterator {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_end(&self, from: usize) -> usize {
        from + self.value[from..].chars().next().map_or(0, char::len_utf8)
    }
}

impl KeyIterator for StringIterator {
    fn reset(&mut self, key: &str) -> &mut Self {
        self.value.clear();
        self.value.push_str(key);
        self.pos = 0;
        self.end = self.char_end(0);
        self
    }

    fn advance(&mut self) -> &mut Self {
        self.pos = self.end;
        self.end = self.char_end(self.pos);
        self
    }

    fn has_next(&self) -> bool {
        self.end < self.value.len()
    }

    fn value(&self) -> &str {
        &self.value[self.pos..self.end]
    }
}

/// Decomposes a key into `/`- or `\`-separated path segments.
///
/// One trailing separator is dropped before splitting, runs of separators
/// count as a single boundary, and leading separators never produce an empty
/// first segment.
#[derive(Debug, Clone, Default)]
pub struct PathIterator {
    value: String,
    from: usize,
    to: usize,
}

#[inline]
fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

impl PathIterator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyIterator for PathIterator {
    fn reset(&mut self, key: &str) -> &mut Self {
        let trimmed = key
            .strip_suffix(|c: char| c == '/' || c == '\\')
            .unwrap_or(key);
        self.value.clear();
        self.value.push_str(trimmed);
        self.from = 0;
        self.to = 0;
        self.advance()
    }

    fn advance(&mut self) -> &mut Self {
        // Separators are ASCII, so every byte index the scan stops at is a
        // char boundary.
        let bytes = self.value.as_bytes();
        self.from = self.to;
        let mut just_seps = true;
        while self.to < bytes.len() {
            if is_separator(bytes[self.to]) {
                if just_seps {
                    self.from += 1;
                } else {
                    break;
                }
            } else {
                just_seps = false;
            }
            self.to += 1;
        }
        self
    }

    fn has_next(&self) -> bool {
        self.to < self.value.len()
    }

    fn value(&self) -> &str {
        &self.value[self.from..self.to]
    }
}
