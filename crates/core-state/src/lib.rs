//! Editor state: the document, its undo engine, style, file metadata and notices.
//!
//! All document mutations go through `EditorState::edit` so the undo engine
//! and the modified flag cannot drift out of step with the text. Caret and
//! selection movement uses `set_selection`, which is not an edit.
//!
//! Undo granularity is "edits between checkpoints" (see `undo`). The state
//! does not decide when a checkpoint happens; the dispatcher calls
//! `checkpoint` on focus loss, action keys, menu/dialog activation, save and
//! exit.
//!
//! Notices:
//! - Errors and confirmations surface as an ephemeral status message with a
//!   fixed time to live. The runtime ticks `tick_ephemeral` to expire them.

use core_text::{Document, Selection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod error;
pub mod line_ending;
pub mod style;
pub mod undo;

pub use error::EditorError;
pub use line_ending::{LineEnding, NormalizedText, expand_line_endings, normalize_line_endings};
pub use style::{ColorTarget, FontFamily, FontSize, FontWeight, PALETTE, Rgb, StyleState};
pub use undo::{CheckpointReason, UNDO_HISTORY_MAX, UndoEngine, UndoSnapshot};

/// Default time to live for status notices.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// Top-level editor state container (one document per process).
pub struct EditorState {
    document: Document,
    undo: UndoEngine,
    pub style: StyleState,
    pub file_name: Option<PathBuf>,
    /// Content differs from what was last loaded or saved.
    pub modified: bool,
    pub original_line_ending: LineEnding,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub notice_ttl: Duration,
    /// Content as of the last load or save; `modified` compares against it.
    saved: Arc<str>,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self::with_undo_capacity(document, UNDO_HISTORY_MAX)
    }

    pub fn with_undo_capacity(document: Document, capacity: usize) -> Self {
        let undo = UndoEngine::with_capacity(&document, capacity);
        let saved = Arc::from(document.text());
        Self {
            document,
            undo,
            style: StyleState::default(),
            file_name: None,
            modified: false,
            original_line_ending: LineEnding::Lf,
            ephemeral_status: None,
            notice_ttl: DEFAULT_NOTICE_TTL,
            saved,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn undo_engine(&self) -> &UndoEngine {
        &self.undo
    }

    /// Apply a mutation to the document. The closure reports whether the content changed;
    /// only then is the edit recorded for undo and the modified flag refreshed.
    pub fn edit<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let changed = f(&mut self.document);
        if changed {
            self.undo.record_edit();
            self.refresh_modified();
        }
        changed
    }

    /// Move the caret or selection. Not an edit.
    pub fn set_selection(&mut self, selection: Selection) {
        self.document.set_selection(selection);
    }

    pub fn select_all(&mut self) {
        self.document.select_all();
    }

    pub fn checkpoint(&mut self, reason: CheckpointReason) -> bool {
        self.undo.checkpoint(&self.document, reason)
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.undo.undo(&mut self.document);
        if changed {
            self.refresh_modified();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.undo.redo(&mut self.document);
        if changed {
            self.refresh_modified();
        }
        changed
    }

    fn refresh_modified(&mut self) {
        self.modified = self.document.text() != &*self.saved;
    }

    /// Replace the document with freshly loaded content: fresh undo baseline, clean flag.
    pub fn replace_document(&mut self, content: &str, path: Option<PathBuf>, ending: LineEnding) {
        self.document = Document::from_str(content);
        self.undo.reset(&self.document);
        self.saved = Arc::from(content);
        self.file_name = path;
        self.original_line_ending = ending;
        self.modified = false;
    }

    /// File > New: empty document, no path, empty history.
    pub fn new_document(&mut self) {
        self.replace_document("", None, LineEnding::Lf);
    }

    /// Record a successful save to `path`.
    pub fn mark_saved(&mut self, path: &Path) {
        self.file_name = Some(path.to_path_buf());
        self.saved = Arc::from(self.document.text());
        self.modified = false;
    }

    /// Display name for title and status line.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// Set a notice using the configured time to live.
    pub fn notify<S: Into<String>>(&mut self, msg: S) {
        let ttl = self.notice_ttl;
        self.set_ephemeral(msg, ttl);
    }

    /// Log a recoverable error and surface it as a notice.
    pub fn report_error(&mut self, err: &EditorError) {
        tracing::warn!(target: "state", kind = err.kind(), error = %err, "recoverable_error");
        self.notify(err.to_string());
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        self.tick_ephemeral_at(Instant::now())
    }

    pub fn tick_ephemeral_at(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && now >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }
}
