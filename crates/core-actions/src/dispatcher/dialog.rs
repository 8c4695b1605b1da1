//! Modal dialog input. While a dialog is open every key lands here; the
//! dialog's outcome decides what happens to the document.

use super::DispatchResult;
use crate::io_ops;
use core_model::{DialogKey, DialogOutcome, EditorModel, View};

pub(crate) fn handle_dialog_key(key: DialogKey, model: &mut EditorModel) -> DispatchResult {
    let Some(dialog) = model.dialog.as_mut() else {
        return DispatchResult::clean();
    };
    match dialog.handle(key) {
        DialogOutcome::Pending => {}
        DialogOutcome::Cancelled => {
            tracing::debug!(target: "actions.dispatch", op = "dialog", "dialog_cancelled");
            model.close_dialog();
        }
        DialogOutcome::OpenPath(path) => {
            model.close_dialog();
            let state = model.state_mut();
            match io_ops::load_into(state, &path) {
                Ok(()) => {
                    let name = state.display_name();
                    state.notify(format!("Opened {name}"));
                    model.view = View::default();
                }
                Err(e) => state.report_error(&e),
            }
        }
        DialogOutcome::SavePath(path) => {
            model.close_dialog();
            let state = model.state_mut();
            match io_ops::write_file(state, &path) {
                Ok(()) => {
                    let name = state.display_name();
                    state.notify(format!("Saved {name}"));
                }
                Err(e) => state.report_error(&e),
            }
        }
        DialogOutcome::ApplyColor(target, color) => {
            model.close_dialog();
            let changed = model.state_mut().style.set_color(target, color);
            tracing::debug!(target: "actions.dispatch", op = "style", axis = target.label(), changed, "style");
        }
    }
    DispatchResult::dirty()
}
