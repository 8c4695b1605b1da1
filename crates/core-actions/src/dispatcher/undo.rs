//! Undo / Redo handling.
//!
//! Both operations checkpoint pending edits first (inside the engine), then
//! restore a whole-buffer snapshot. An empty stack is reported as a notice.

use super::DispatchResult;
use core_model::EditorModel;
use core_state::EditorError;

pub(crate) fn handle_undo(model: &mut EditorModel) -> DispatchResult {
    let state = model.state_mut();
    if state.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", depth = state.undo_engine().undo_depth(), "undo");
    } else {
        state.report_error(&EditorError::UndoUnavailable);
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_redo(model: &mut EditorModel) -> DispatchResult {
    let state = model.state_mut();
    if state.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", depth = state.undo_engine().redo_depth(), "redo");
    } else {
        state.report_error(&EditorError::RedoUnavailable);
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;
    use core_text::Document;

    #[test]
    fn empty_history_reports_notice() {
        let mut m = EditorModel::new(EditorState::new(Document::new()));
        handle_undo(&mut m);
        let notice = m.state().ephemeral_status.as_ref().map(|n| n.text.clone());
        assert_eq!(notice.as_deref(), Some("Nothing to undo"));
        handle_redo(&mut m);
        let notice = m.state().ephemeral_status.as_ref().map(|n| n.text.clone());
        assert_eq!(notice.as_deref(), Some("Nothing to redo"));
    }

    #[test]
    fn undo_then_redo_round_trips_pending_edit() {
        let mut m = EditorModel::new(EditorState::new(Document::new()));
        m.state_mut().edit(|d| d.replace_selection("draft"));
        handle_undo(&mut m);
        assert_eq!(m.state().document().text(), "");
        handle_redo(&mut m);
        assert_eq!(m.state().document().text(), "draft");
    }
}
