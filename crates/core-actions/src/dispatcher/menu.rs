//! Menu bar navigation. Opening a menu is a checkpoint trigger; activating an
//! item runs the same command path as its keyboard shortcut.

use super::{DispatchResult, run_command};
use crate::Clipboard;
use core_menu::{MenuNav, MenuOutcome};
use core_model::EditorModel;
use core_state::CheckpointReason;

pub(crate) fn open_menu(idx: usize, model: &mut EditorModel) -> DispatchResult {
    model.state_mut().checkpoint(CheckpointReason::MenuOpened);
    let (bar, menu) = model.menu_parts();
    menu.open(bar, idx);
    DispatchResult::dirty()
}

pub(crate) fn handle_nav(
    nav: MenuNav,
    model: &mut EditorModel,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    let (bar, menu) = model.menu_parts();
    match menu.handle(bar, nav) {
        MenuOutcome::Activate(cmd) => run_command(cmd, model, clipboard),
        MenuOutcome::Moved | MenuOutcome::Closed => DispatchResult::dirty(),
        MenuOutcome::Ignored => DispatchResult::clean(),
    }
}
