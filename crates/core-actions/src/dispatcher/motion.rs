//! Motion sub-dispatch (caret movement).
//!
//! Every motion is an action key: pending edits are checkpointed before the
//! caret moves. Without Shift a non-empty selection collapses toward the
//! direction of travel; with Shift the anchor stays put and the head moves.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditorModel;
use core_state::CheckpointReason;
use core_text::{Document, Selection, motion};

pub(crate) fn handle_motion(
    kind: MotionKind,
    extend: bool,
    model: &mut EditorModel,
) -> DispatchResult {
    let page = model.view.last_text_height.saturating_sub(1).max(1) as isize;
    let state = model.state_mut();
    state.checkpoint(CheckpointReason::ActionKey);
    let doc = state.document();
    let sel = doc.selection();
    let head = target(doc, sel, kind, extend, page);
    let next = if extend {
        Selection::new(sel.anchor, head)
    } else {
        Selection::caret(head)
    };
    if next == sel {
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", op = "motion", ?kind, extend, from = sel.head, to = head);
    state.set_selection(next);
    DispatchResult::dirty()
}

fn target(doc: &Document, sel: Selection, kind: MotionKind, extend: bool, page: isize) -> usize {
    let head = sel.head;
    if !extend && !sel.is_empty() {
        match kind {
            MotionKind::Left => return sel.start(),
            MotionKind::Right => return sel.end(),
            _ => {}
        }
    }
    match kind {
        MotionKind::Left => motion::left(doc, head),
        MotionKind::Right => motion::right(doc, head),
        MotionKind::Up => motion::vertical(doc, head, -1),
        MotionKind::Down => motion::vertical(doc, head, 1),
        MotionKind::LineStart => motion::line_start(doc, head),
        MotionKind::LineEnd => motion::line_end(doc, head),
        MotionKind::PageUp => motion::vertical(doc, head, -page),
        MotionKind::PageDown => motion::vertical(doc, head, page),
        MotionKind::DocStart => 0,
        MotionKind::DocEnd => doc.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;

    fn model(text: &str, caret: usize) -> EditorModel {
        let mut m = EditorModel::new(EditorState::new(Document::from_str(text)));
        m.state_mut().set_selection(Selection::caret(caret));
        m
    }

    #[test]
    fn shift_extends_from_anchor() {
        let mut m = model("hello world", 6);
        handle_motion(MotionKind::LineEnd, true, &mut m);
        assert_eq!(m.state().document().selected_text(), Some("world"));
        handle_motion(MotionKind::Left, true, &mut m);
        assert_eq!(m.state().document().selected_text(), Some("worl"));
    }

    #[test]
    fn plain_arrow_collapses_selection() {
        let mut m = model("hello world", 0);
        m.state_mut().set_selection(Selection::new(2, 7));
        handle_motion(MotionKind::Left, false, &mut m);
        assert_eq!(m.state().document().caret(), 2);
        m.state_mut().set_selection(Selection::new(2, 7));
        handle_motion(MotionKind::Right, false, &mut m);
        assert_eq!(m.state().document().caret(), 7);
    }

    #[test]
    fn paging_uses_last_text_height() {
        let text: String = (0..20).map(|i| format!("{i}\n")).collect();
        let mut m = model(&text, 0);
        m.view.last_text_height = 6;
        handle_motion(MotionKind::PageDown, false, &mut m);
        let doc = m.state().document();
        assert_eq!(doc.position_of(doc.caret()).line, 5);
        handle_motion(MotionKind::DocEnd, false, &mut m);
        assert_eq!(m.state().document().caret(), m.state().document().len());
    }

    #[test]
    fn motion_at_boundary_is_clean() {
        let mut m = model("ab", 0);
        assert_eq!(
            handle_motion(MotionKind::Left, false, &mut m),
            DispatchResult::clean()
        );
    }
}
