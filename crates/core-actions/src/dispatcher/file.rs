//! File menu: New, Open, Save, Exit.
//!
//! Open and Save continue in a path dialog; the IO itself happens in
//! `dialog` once a path is confirmed.

use super::DispatchResult;
use core_model::{Dialog, EditorModel, PathPrompt, PathPurpose, View};
use core_state::CheckpointReason;

pub(crate) fn handle_new(model: &mut EditorModel) -> DispatchResult {
    model.state_mut().new_document();
    model.view = View::default();
    tracing::info!(target: "actions.dispatch", op = "new", "document_reset");
    DispatchResult::dirty()
}

pub(crate) fn prompt_open(model: &mut EditorModel) -> DispatchResult {
    let initial = initial_path(model);
    model.open_dialog(Dialog::Path(PathPrompt::new(PathPurpose::Open, initial)));
    DispatchResult::dirty()
}

pub(crate) fn prompt_save(model: &mut EditorModel) -> DispatchResult {
    model.state_mut().checkpoint(CheckpointReason::Save);
    let initial = initial_path(model);
    model.open_dialog(Dialog::Path(PathPrompt::new(PathPurpose::Save, initial)));
    DispatchResult::dirty()
}

/// Exit quits immediately on a clean document. With unsaved changes the first
/// Exit only warns; a second consecutive Exit discards them.
pub(crate) fn handle_exit(model: &mut EditorModel) -> DispatchResult {
    model.state_mut().checkpoint(CheckpointReason::Exit);
    if !model.state().modified || model.exit_armed {
        tracing::info!(target: "actions.dispatch", op = "exit", discarded = model.state().modified, "exit");
        return DispatchResult::quit();
    }
    model.exit_armed = true;
    model
        .state_mut()
        .notify("Unsaved changes. Exit again to discard them");
    DispatchResult::dirty()
}

/// The current file path, or the working directory with a trailing separator.
fn initial_path(model: &EditorModel) -> String {
    if let Some(path) = &model.state().file_name {
        return path.display().to_string();
    }
    std::env::current_dir()
        .map(|d| format!("{}{}", d.display(), std::path::MAIN_SEPARATOR))
        .unwrap_or_default()
}
