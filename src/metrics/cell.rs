use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Used for counters recorded from read-only cache methods such as `peek`.
/// The cache is single-threaded, so a plain `Cell` suffices.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

impl Clone for MetricsCell {
    fn clone(&self) -> Self {
        Self(Cell::new(self.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_through_shared_reference() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.incr();
        assert_eq!(cell.get(), 2);
        let copy = cell.clone();
        cell.reset();
        assert_eq!(cell.get(), 0);
        assert_eq!(copy.get(), 2);
    }
}
