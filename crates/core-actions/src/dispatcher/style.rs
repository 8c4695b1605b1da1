//! Font and color commands. Each changes exactly one style axis; the document
//! and its history are never touched.

use super::DispatchResult;
use core_model::{ColorChooser, Dialog, EditorModel};
use core_state::{ColorTarget, FontFamily, FontSize, FontWeight};

pub(crate) fn set_weight(weight: FontWeight, model: &mut EditorModel) -> DispatchResult {
    changed(model.state_mut().style.set_weight(weight), "weight")
}

pub(crate) fn set_size(size: FontSize, model: &mut EditorModel) -> DispatchResult {
    changed(model.state_mut().style.set_size(size), "size")
}

pub(crate) fn set_family(family: FontFamily, model: &mut EditorModel) -> DispatchResult {
    changed(model.state_mut().style.set_family(family), "family")
}

pub(crate) fn prompt_color(target: ColorTarget, model: &mut EditorModel) -> DispatchResult {
    let current = model.state().style.color(target);
    model.open_dialog(Dialog::Color(ColorChooser::new(target, current)));
    DispatchResult::dirty()
}

fn changed(changed: bool, axis: &'static str) -> DispatchResult {
    tracing::debug!(target: "actions.dispatch", op = "style", axis, changed, "style");
    // Menu closing always needs a redraw.
    DispatchResult::dirty()
}
