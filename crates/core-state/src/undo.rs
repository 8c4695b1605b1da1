//! Checkpointed whole-buffer undo.
//!
//! Edits are not recorded one keystroke at a time. The engine keeps one open
//! window whose baseline is the document as it looked when the window opened.
//! `record_edit` only marks the window dirty; `checkpoint` closes it by
//! committing a unit holding both the baseline (`before`) and the current
//! content (`after`), then opens a fresh window at `after`.
//!
//! Invariants:
//! * At most one open window exists, and its baseline always equals the
//!   document content right after the last checkpoint, undo, redo or reset.
//! * Any committed unit clears the redo stack.
//! * `undo`/`redo` checkpoint pending edits first, so uncommitted typing is
//!   never silently discarded by a history step.
//! * The undo stack never exceeds its capacity; the oldest units go first.

use core_text::{Document, Selection};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::trace;

/// Default maximum number of units retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Why a checkpoint was requested. Only used for telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointReason {
    FocusLost,
    ActionKey,
    MenuOpened,
    /// A menu command ran (from the menu or its shortcut).
    Command,
    HistoryStep,
    Save,
    Exit,
}

impl CheckpointReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckpointReason::FocusLost => "focus_lost",
            CheckpointReason::ActionKey => "action_key",
            CheckpointReason::MenuOpened => "menu_opened",
            CheckpointReason::Command => "command",
            CheckpointReason::HistoryStep => "history_step",
            CheckpointReason::Save => "save",
            CheckpointReason::Exit => "exit",
        }
    }
}

/// Immutable capture of the document at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoSnapshot {
    content: Arc<str>,
    selection: Selection,
}

impl UndoSnapshot {
    pub fn capture(doc: &Document) -> Self {
        Self {
            content: Arc::from(doc.text()),
            selection: doc.selection(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    fn restore_into(&self, doc: &mut Document) {
        doc.restore(&self.content, self.selection);
    }
}

/// One committed history entry. Holding both sides lets the unit reverse and
/// reapply itself without consulting its neighbours.
#[derive(Clone, Debug)]
pub struct UndoUnit {
    pub before: UndoSnapshot,
    pub after: UndoSnapshot,
}

pub struct UndoEngine {
    undo_stack: VecDeque<UndoUnit>,
    redo_stack: Vec<UndoUnit>,
    open: UndoSnapshot,
    dirty: bool,
    capacity: usize,
    /// Checkpoints that found the content unchanged despite recorded edits.
    commits_skipped: u64,
}

impl UndoEngine {
    pub fn new(doc: &Document) -> Self {
        Self::with_capacity(doc, UNDO_HISTORY_MAX)
    }

    pub fn with_capacity(doc: &Document, capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            open: UndoSnapshot::capture(doc),
            dirty: false,
            capacity: capacity.max(1),
            commits_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn has_pending_edits(&self) -> bool {
        self.dirty
    }
    pub fn commits_skipped(&self) -> u64 {
        self.commits_skipped
    }
    /// Baseline of the currently open window.
    pub fn open_snapshot(&self) -> &UndoSnapshot {
        &self.open
    }

    /// Mark the open window dirty. Called after every document mutation.
    pub fn record_edit(&mut self) {
        if !self.dirty {
            trace!(target: "state.undo", "window_dirty");
        }
        self.dirty = true;
    }

    /// Commit pending edits as one unit. Returns true if a unit was committed.
    pub fn checkpoint(&mut self, doc: &Document, reason: CheckpointReason) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        let after = UndoSnapshot::capture(doc);
        if after.content == self.open.content {
            self.commits_skipped += 1;
            // Keep the baseline caret in step with the document even when nothing changed.
            self.open = after;
            trace!(target: "state.undo", reason = reason.as_str(), "checkpoint_dedupe_skip");
            return false;
        }
        let before = std::mem::replace(&mut self.open, after.clone());
        self.undo_stack.push_back(UndoUnit { before, after });
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", capacity = self.capacity, "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        trace!(
            target: "state.undo",
            reason = reason.as_str(),
            undo_depth = self.undo_stack.len(),
            bytes = doc.len(),
            "checkpoint_commit"
        );
        true
    }

    /// Step back one unit. Returns false (and leaves the document alone) when history is empty.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        self.checkpoint(doc, CheckpointReason::HistoryStep);
        let Some(unit) = self.undo_stack.pop_back() else {
            trace!(target: "state.undo", "undo_unavailable");
            return false;
        };
        unit.before.restore_into(doc);
        self.open = unit.before.clone();
        self.redo_stack.push(unit);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        true
    }

    /// Reapply the most recently undone unit. Returns false when there is nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        self.checkpoint(doc, CheckpointReason::HistoryStep);
        let Some(unit) = self.redo_stack.pop() else {
            trace!(target: "state.undo", "redo_unavailable");
            return false;
        };
        unit.after.restore_into(doc);
        self.open = unit.after.clone();
        self.undo_stack.push_back(unit);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        true
    }

    /// Drop all history and take `doc` as the new baseline.
    pub fn reset(&mut self, doc: &Document) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = UndoSnapshot::capture(doc);
        self.dirty = false;
        trace!(target: "state.undo", "history_reset");
    }
}
