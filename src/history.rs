//! Linear undo/redo container.
//!
//! `History` holds a present value plus full snapshots of the values before
//! (`past`) and after (`future`) it. Every commit moves the old present onto
//! `past` and discards `future`; undo and redo shuttle snapshots between the
//! two stacks. Snapshots are independent owned copies.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::consts::DEFAULT_HISTORY_LIMIT;

/// Past/present/future snapshots with a bounded undo depth.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    /// Redo stack; the next snapshot to redo is the last element.
    future: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Start a history at `present` with the default depth limit.
    #[must_use]
    pub fn new(present: T) -> Self {
        Self::with_limit(present, DEFAULT_HISTORY_LIMIT)
    }

    /// Start a history retaining at most `limit` undo snapshots (minimum 1).
    #[must_use]
    pub fn with_limit(present: T, limit: usize) -> Self {
        Self { past: Vec::new(), present, future: Vec::new(), limit: limit.max(1) }
    }

    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Undo snapshots, oldest first.
    #[must_use]
    pub fn past(&self) -> &[T] {
        &self.past
    }

    /// Redo snapshots in the order `redo` would restore them.
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter().rev()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Replace the present with `next`, pushing the old present onto the undo stack.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        if self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
        self.future.clear();
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Replace the present and drop both stacks.
    pub fn reset(&mut self, present: T) {
        self.present = present;
        self.past.clear();
        self.future.clear();
    }
}
