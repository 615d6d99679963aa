//! Bounded undo/redo history over immutable snapshots.
//!
//! `present` is the single source of truth. `set` replaces it without
//! recording anything and is meant for continuous updates (drag frames,
//! live text preview). `commit` records one undo step. Choosing the
//! right one per operation is the whole history discipline of the
//! engine; see [`crate::store`].
//!
//! Snapshots pushed to `past`/`future` are clones and are never mutated
//! in place afterwards. Keep the snapshot type light (block lists, not
//! pixels).

use std::collections::VecDeque;

/// Default number of undo steps retained.
pub const DEFAULT_MAX_HISTORY: usize = 5;

/// Generic bounded undo/redo container.
#[derive(Debug, Clone)]
pub struct History<S: Clone> {
    present: S,
    /// Committed snapshots, oldest at the front. Bounded at `max`;
    /// the oldest entry is evicted first.
    past: VecDeque<S>,
    /// Undone snapshots, next redo target at the front.
    future: VecDeque<S>,
    max: usize,
}

impl<S: Clone> History<S> {
    /// Create a history with the default depth.
    pub fn new(initial: S) -> Self {
        Self::with_max(initial, DEFAULT_MAX_HISTORY)
    }

    /// Create a history retaining at most `max` undo steps.
    pub fn with_max(initial: S, max: usize) -> Self {
        Self {
            present: initial,
            past: VecDeque::new(),
            future: VecDeque::new(),
            max,
        }
    }

    /// The current state.
    pub fn present(&self) -> &S {
        &self.present
    }

    /// Replace the current state without recording an undo step.
    pub fn set(&mut self, next: S) {
        self.present = next;
    }

    /// Mutate the current state in place without recording an undo step.
    pub fn set_with(&mut self, f: impl FnOnce(&mut S)) {
        f(&mut self.present);
    }

    /// Record the current state as an undo step, then replace it.
    /// Any redo path is invalidated.
    pub fn commit(&mut self, next: S) {
        self.push_past();
        self.future.clear();
        self.present = next;
    }

    /// Record the current state as an undo step, then mutate in place.
    pub fn commit_with(&mut self, f: impl FnOnce(&mut S)) {
        self.push_past();
        self.future.clear();
        f(&mut self.present);
    }

    /// Step back to the last committed snapshot. Returns false if there
    /// is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop_back() else {
            return false;
        };
        self.future.push_front(self.present.clone());
        self.present = prev;
        true
    }

    /// Step forward to the next undone snapshot. Returns false if there
    /// is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        self.push_past();
        self.present = next;
        true
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop all history, optionally replacing the current state.
    pub fn clear(&mut self, next: Option<S>) {
        self.past.clear();
        self.future.clear();
        if let Some(next) = next {
            self.present = next;
        }
    }

    /// Number of retained undo steps.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of available redo steps.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self) {
        self.past.push_back(self.present.clone());
        while self.past.len() > self.max {
            self.past.pop_front();
        }
    }
}
