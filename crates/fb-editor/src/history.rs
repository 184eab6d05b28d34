//! Bounded snapshot history for undo/redo.
//!
//! An arena of full deep-copied collection snapshots indexed by a cursor;
//! `snapshots[cursor]` is the committed live state. Structural mutations
//! (add/delete/duplicate/clear) commit a snapshot; geometry moves and
//! property edits do not — a drag is live preview until drop and cannot
//! be undone.

use fb_core::model::FormField;

/// Maximum retained snapshots; the oldest is dropped beyond this.
pub const HISTORY_DEPTH: usize = 50;

pub struct History {
    snapshots: Vec<Vec<FormField>>,
    cursor: usize,
    max_depth: usize,
}

impl History {
    /// Start a history whose first snapshot is the initial collection.
    pub fn new(max_depth: usize, initial: &[FormField]) -> Self {
        Self {
            snapshots: vec![initial.to_vec()],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Commit the post-mutation collection as the new current state.
    /// Truncates any redo tail and trims the oldest entry past capacity.
    pub fn commit(&mut self, fields: &[FormField]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(fields.to_vec());
        if self.snapshots.len() > self.max_depth {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. No-op at the oldest retained state.
    pub fn undo(&mut self) -> Option<&[FormField]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot. No-op at the newest state.
    pub fn redo(&mut self) -> Option<&[FormField]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Index of the current state within the arena.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_DEPTH, &[])
    }
}
