//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `motion`    - caret movement and selection extension
//! * `edit`      - text mutation (typing, newline, tab, delete)
//! * `clipboard` - cut / copy / paste through the clipboard bridge
//! * `file`      - New / Open / Save / Exit
//! * `style`     - font and color commands
//! * `menu`      - menu bar navigation
//! * `dialog`    - modal dialog input and results
//! * `undo`      - undo / redo
//!
//! Checkpoint triggers live here and nowhere else: action keys (motions and
//! bare function keys), focus loss, opening a menu, running any menu command,
//! Save and Exit. Every document mutation goes through `EditorState::edit`.

use crate::{Action, Clipboard};
use core_menu::MenuCommand;
use core_model::EditorModel;
use core_state::CheckpointReason;

mod clipboard;
mod dialog;
mod edit;
mod file;
mod menu;
mod motion;
mod style;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The frame must be redrawn.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Apply an action to the model. Returns whether a redraw is needed and
/// whether the editor should exit.
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", action = action_label(&action), "dispatch");
    if !matches!(
        action,
        Action::Command(MenuCommand::Exit) | Action::OpenMenu(_) | Action::MenuNav(_)
    ) {
        model.exit_armed = false;
    }
    let result = match action {
        Action::Motion { kind, extend } => motion::handle_motion(kind, extend, model),
        Action::Edit(kind) => edit::handle_edit(kind, model),
        Action::SelectAll => {
            model.state_mut().select_all();
            DispatchResult::dirty()
        }
        Action::Checkpoint(reason) => {
            model.state_mut().checkpoint(reason);
            DispatchResult::clean()
        }
        Action::OpenMenu(idx) => menu::open_menu(idx, model),
        Action::MenuNav(nav) => menu::handle_nav(nav, model, clipboard),
        Action::Command(cmd) => run_command(cmd, model, clipboard),
        Action::Dialog(key) => dialog::handle_dialog_key(key, model),
    };
    if result.dirty {
        model.auto_scroll();
    }
    result
}

/// Run a menu command, whether it came from the menu or from its shortcut.
pub(crate) fn run_command(
    cmd: MenuCommand,
    model: &mut EditorModel,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    tracing::debug!(target: "actions.dispatch", command = ?cmd, "command");
    if cmd != MenuCommand::Exit {
        model.exit_armed = false;
    }
    match cmd {
        MenuCommand::Undo | MenuCommand::Redo | MenuCommand::Exit | MenuCommand::Save => {}
        _ => {
            model.state_mut().checkpoint(CheckpointReason::Command);
        }
    }
    match cmd {
        MenuCommand::New => file::handle_new(model),
        MenuCommand::Open => file::prompt_open(model),
        MenuCommand::Save => file::prompt_save(model),
        MenuCommand::Exit => file::handle_exit(model),
        MenuCommand::Cut => clipboard::handle_cut(model, clipboard),
        MenuCommand::Copy => clipboard::handle_copy(model, clipboard),
        MenuCommand::Paste => clipboard::handle_paste(model, clipboard),
        MenuCommand::SetWeight(w) => style::set_weight(w, model),
        MenuCommand::SetSize(s) => style::set_size(s, model),
        MenuCommand::SetFamily(f) => style::set_family(f, model),
        MenuCommand::ChooseColor(target) => style::prompt_color(target, model),
        MenuCommand::Undo => undo::handle_undo(model),
        MenuCommand::Redo => undo::handle_redo(model),
    }
}

/// Action name for logs. Never includes typed or pasted text.
fn action_label(action: &Action) -> &'static str {
    match action {
        Action::Motion { .. } => "motion",
        Action::Edit(_) => "edit",
        Action::SelectAll => "select_all",
        Action::Checkpoint(_) => "checkpoint",
        Action::OpenMenu(_) => "open_menu",
        Action::MenuNav(_) => "menu_nav",
        Action::Command(_) => "command",
        Action::Dialog(_) => "dialog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditKind, MemoryClipboard, MotionKind};
    use core_state::EditorState;
    use core_text::Document;

    fn model(text: &str) -> EditorModel {
        EditorModel::new(EditorState::new(Document::from_str(text)))
    }

    fn run(model: &mut EditorModel, action: Action) -> DispatchResult {
        let mut cb = MemoryClipboard::new();
        dispatch(action, model, &mut cb)
    }

    #[test]
    fn typing_is_one_unit_until_an_action_key() {
        let mut m = model("");
        for c in ["a", "b", "c"] {
            run(&mut m, Action::Edit(EditKind::InsertText(c.into())));
        }
        assert_eq!(m.state().undo_engine().undo_depth(), 0);
        run(
            &mut m,
            Action::Motion {
                kind: MotionKind::Left,
                extend: false,
            },
        );
        assert_eq!(m.state().undo_engine().undo_depth(), 1);
        run(&mut m, Action::Command(MenuCommand::Undo));
        assert_eq!(m.state().document().text(), "");
    }

    #[test]
    fn focus_lost_checkpoints_without_redraw() {
        let mut m = model("");
        run(&mut m, Action::Edit(EditKind::InsertText("x".into())));
        let r = run(&mut m, Action::Checkpoint(CheckpointReason::FocusLost));
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(m.state().undo_engine().undo_depth(), 1);
    }

    #[test]
    fn select_all_selects_whole_document() {
        let mut m = model("abc\ndef");
        run(&mut m, Action::SelectAll);
        assert_eq!(m.state().document().selected_text(), Some("abc\ndef"));
        assert!(!m.state().modified);
    }

    #[test]
    fn edits_disarm_pending_exit() {
        let mut m = model("");
        run(&mut m, Action::Edit(EditKind::InsertText("x".into())));
        assert!(!run(&mut m, Action::Command(MenuCommand::Exit)).quit);
        assert!(m.exit_armed);
        run(&mut m, Action::Edit(EditKind::InsertText("y".into())));
        assert!(!m.exit_armed);
        assert!(!run(&mut m, Action::Command(MenuCommand::Exit)).quit);
        assert!(run(&mut m, Action::Command(MenuCommand::Exit)).quit);
    }
}
