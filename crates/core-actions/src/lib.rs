//! Actions: what a key or input event means, and the handlers that apply it.
//!
//! Input flows `InputEvent -> translate_input -> Action -> dispatch`. The
//! translator is pure and routes by `UiContext` (dialog, open menu, text),
//! so modality is a property of the model rather than of a blocked loop.

pub mod clipboard;
pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::{translate_input, translate_key};

use core_menu::{MenuCommand, MenuNav};
use core_model::DialogKey;
use core_state::CheckpointReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocStart,
    DocEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Typed characters or terminal paste; replaces the selection.
    InsertText(String),
    InsertNewline,
    InsertTab,
    Backspace,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Caret motion; `extend` keeps the anchor (Shift held).
    Motion { kind: MotionKind, extend: bool },
    Edit(EditKind),
    SelectAll,
    /// Commit pending edits without doing anything else (focus loss, bare function keys).
    Checkpoint(CheckpointReason),
    OpenMenu(usize),
    MenuNav(MenuNav),
    Command(MenuCommand),
    Dialog(DialogKey),
}
