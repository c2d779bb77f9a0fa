//! Linear undo/redo over whole-state snapshots.
//!
//! The caller records the current state *before* each discrete edit.
//! Undo and redo exchange the caller's current state with a stored one,
//! so the stacks never hold the live state itself.

use std::collections::VecDeque;

use tracing::trace;

/// Undo depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Bounded snapshot history.
///
/// # Invariants
///
/// 1. `undo.len() <= max_depth` after every operation; the oldest
///    snapshots are evicted first.
/// 2. Any `record_before_edit` clears the redo stack.
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Oldest snapshot at the front, most recent at the back.
    undo: VecDeque<T>,
    /// Most recently undone snapshot at the front.
    redo: VecDeque<T>,
    max_depth: usize,
}

impl<T: Clone> History<T> {
    /// Create a history holding at most `max_depth` undo entries.
    ///
    /// A depth of zero disables undo entirely.
    pub const fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            max_depth,
        }
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Snapshot `current` ahead of an edit and drop any redo entries.
    pub fn record_before_edit(&mut self, current: &T) {
        self.redo.clear();
        self.undo.push_back(current.clone());
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        trace!(undo = self.undo.len(), "history recorded");
    }

    /// Step back one edit.
    ///
    /// Returns the state to restore, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo.pop_back()?;
        self.redo.push_front(current);
        Some(previous)
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo.pop_front()?;
        self.undo.push_back(current);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        Some(next)
    }

    /// Drop every stored snapshot.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
