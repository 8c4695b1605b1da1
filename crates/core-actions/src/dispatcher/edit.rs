//! Text edit action handling (typing, newline, tab, backspace, delete).
//!
//! Every mutation replaces the selection when one exists and goes through
//! `EditorState::edit`, which records the edit for undo. Terminal paste
//! arrives here as `InsertText` and is normalized to `\n` line endings first.

use super::DispatchResult;
use crate::EditKind;
use core_model::EditorModel;
use core_state::normalize_line_endings;

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> DispatchResult {
    let state = model.state_mut();
    let op = match &kind {
        EditKind::InsertText(_) => "insert_text",
        EditKind::InsertNewline => "insert_newline",
        EditKind::InsertTab => "insert_tab",
        EditKind::Backspace => "backspace",
        EditKind::Delete => "delete",
    };
    let changed = match kind {
        EditKind::InsertText(text) => {
            let text = if text.contains('\r') {
                normalize_line_endings(&text).normalized
            } else {
                text
            };
            state.edit(|d| d.replace_selection(&text))
        }
        EditKind::InsertNewline => state.edit(|d| d.replace_selection("\n")),
        EditKind::InsertTab => state.edit(|d| d.replace_selection("\t")),
        EditKind::Backspace => state.edit(|d| d.delete_backward()),
        EditKind::Delete => state.edit(|d| d.delete_forward()),
    };
    tracing::trace!(target: "actions.dispatch", op, changed, caret = state.document().caret(), "edit");
    if changed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
