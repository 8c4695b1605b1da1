//! Cut / Copy / Paste through the clipboard bridge.
//!
//! Cut and Paste close their own undo unit after mutating so that each one can
//! be undone on its own. Clipboard failures leave the document untouched.

use super::DispatchResult;
use crate::Clipboard;
use core_model::EditorModel;
use core_state::{CheckpointReason, EditorError, normalize_line_endings};

pub(crate) fn handle_cut(model: &mut EditorModel, clipboard: &mut dyn Clipboard) -> DispatchResult {
    let state = model.state_mut();
    let Some(text) = state.document().selected_text().map(str::to_string) else {
        state.report_error(&EditorError::NothingSelected);
        return DispatchResult::dirty();
    };
    if let Err(e) = clipboard.set_text(&text) {
        state.report_error(&e);
        return DispatchResult::dirty();
    }
    state.edit(|d| d.take_selection().is_some());
    state.checkpoint(CheckpointReason::Command);
    tracing::trace!(target: "actions.dispatch", op = "cut", len = text.len(), "cut");
    DispatchResult::dirty()
}

pub(crate) fn handle_copy(model: &mut EditorModel, clipboard: &mut dyn Clipboard) -> DispatchResult {
    let state = model.state_mut();
    let Some(text) = state.document().selected_text() else {
        state.report_error(&EditorError::NothingSelected);
        return DispatchResult::dirty();
    };
    let len = text.len();
    if let Err(e) = clipboard.set_text(text) {
        state.report_error(&e);
        return DispatchResult::dirty();
    }
    tracing::trace!(target: "actions.dispatch", op = "copy", len, "copy");
    DispatchResult::clean()
}

pub(crate) fn handle_paste(
    model: &mut EditorModel,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    let state = model.state_mut();
    let text = match clipboard.get_text() {
        Ok(text) => normalize_line_endings(&text).normalized,
        Err(e) => {
            state.report_error(&e);
            return DispatchResult::dirty();
        }
    };
    if text.is_empty() {
        state.report_error(&EditorError::ClipboardDataUnavailable);
        return DispatchResult::dirty();
    }
    state.edit(|d| d.replace_selection(&text));
    state.checkpoint(CheckpointReason::Command);
    tracing::trace!(target: "actions.dispatch", op = "paste", len = text.len(), "paste");
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryClipboard;
    use core_state::EditorState;
    use core_text::{Document, Selection};

    fn model(text: &str) -> EditorModel {
        EditorModel::new(EditorState::new(Document::from_str(text)))
    }

    #[test]
    fn cut_moves_selection_to_clipboard() {
        let mut m = model("hello world");
        m.state_mut().set_selection(Selection::new(6, 11));
        let mut cb = MemoryClipboard::new();
        handle_cut(&mut m, &mut cb);
        assert_eq!(m.state().document().text(), "hello ");
        assert_eq!(cb.contents(), Some("world"));
        assert_eq!(m.state().undo_engine().undo_depth(), 1);
    }

    #[test]
    fn copy_leaves_document_clean() {
        let mut m = model("hello world");
        m.state_mut().set_selection(Selection::new(0, 5));
        let mut cb = MemoryClipboard::new();
        assert_eq!(handle_copy(&mut m, &mut cb), DispatchResult::clean());
        assert_eq!(cb.contents(), Some("hello"));
        assert!(!m.state().modified);
    }

    #[test]
    fn empty_selection_reports_nothing_selected() {
        let mut m = model("abc");
        let mut cb = MemoryClipboard::with_text("keep");
        handle_cut(&mut m, &mut cb);
        handle_copy(&mut m, &mut cb);
        assert_eq!(cb.contents(), Some("keep"));
        assert_eq!(m.state().document().text(), "abc");
        let notice = m.state().ephemeral_status.as_ref().map(|n| n.text.as_str());
        assert_eq!(notice, Some("Nothing selected"));
    }

    #[test]
    fn paste_replaces_selection_and_normalizes() {
        let mut m = model("one two");
        m.state_mut().set_selection(Selection::new(4, 7));
        let mut cb = MemoryClipboard::with_text("2\r\n3");
        handle_paste(&mut m, &mut cb);
        assert_eq!(m.state().document().text(), "one 2\n3");
        assert_eq!(m.state().document().caret(), 7);
    }

    #[test]
    fn paste_without_text_changes_nothing() {
        let mut m = model("abc");
        let mut cb = MemoryClipboard::new();
        handle_paste(&mut m, &mut cb);
        assert_eq!(m.state().document().text(), "abc");
        assert!(!m.state().modified);
    }
}
