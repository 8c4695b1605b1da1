//! Key -> Action translation.
//!
//! Routing by UI context:
//! * Dialog open: every key belongs to the dialog.
//! * Menu open: arrows navigate, Enter activates, Esc/F10 close, letters jump
//!   to the menu with that mnemonic.
//! * Text: Ctrl chords resolve through the menu bar's declared shortcuts
//!   (plus Ctrl+A select all and Ctrl+Q as an alias for Exit), F10 and
//!   Alt+mnemonic open menus, everything else edits or moves the caret.
//!   Ctrl+Alt characters without a shortcut are typed (AltGr).

use crate::{Action, EditKind, MotionKind};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use core_menu::{MenuBar, MenuCommand, MenuNav};
use core_model::{DialogKey, UiContext};
use core_state::CheckpointReason;

const MENU_KEY: KeyCode = KeyCode::F(10);
/// AltGr arrives as Ctrl+Alt on Windows terminals.
const ALT_GR: KeyModifiers = KeyModifiers::CTRL.union(KeyModifiers::ALT);

/// Translate a non-resize input event. Resize is geometry, handled by the runtime.
pub fn translate_input(ctx: UiContext, bar: &MenuBar, input: &InputEvent) -> Option<Action> {
    match input {
        InputEvent::Key(key) => translate_key(ctx, bar, key),
        InputEvent::Paste(text) => match ctx {
            UiContext::Dialog => Some(Action::Dialog(DialogKey::Text(text.clone()))),
            UiContext::Menu => None,
            UiContext::Text => Some(Action::Edit(EditKind::InsertText(text.clone()))),
        },
        InputEvent::FocusLost => Some(Action::Checkpoint(CheckpointReason::FocusLost)),
        InputEvent::FocusGained | InputEvent::Resize(..) => None,
    }
}

pub fn translate_key(ctx: UiContext, bar: &MenuBar, key: &KeyEvent) -> Option<Action> {
    let action = match ctx {
        UiContext::Dialog => dialog_key(key).map(Action::Dialog),
        UiContext::Menu => menu_key(key).map(Action::MenuNav),
        UiContext::Text => text_key(bar, key),
    };
    tracing::trace!(target: "actions.translate", ?ctx, code = ?key.code, mods = ?key.mods, ?action, "translate");
    action
}

fn dialog_key(key: &KeyEvent) -> Option<DialogKey> {
    Some(match key.code {
        KeyCode::Enter => DialogKey::Confirm,
        KeyCode::Esc => DialogKey::Cancel,
        KeyCode::Backspace => DialogKey::Backspace,
        KeyCode::Delete => DialogKey::Delete,
        KeyCode::Left => DialogKey::Left,
        KeyCode::Right => DialogKey::Right,
        KeyCode::Up => DialogKey::Up,
        KeyCode::Down => DialogKey::Down,
        KeyCode::Home => DialogKey::Home,
        KeyCode::End => DialogKey::End,
        KeyCode::Char(c) if !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
            DialogKey::Char(c)
        }
        KeyCode::Char(c) if key.mods.contains(ALT_GR) => DialogKey::Char(c),
        _ => return None,
    })
}

fn menu_key(key: &KeyEvent) -> Option<MenuNav> {
    Some(match key.code {
        KeyCode::Up => MenuNav::Up,
        KeyCode::Down => MenuNav::Down,
        KeyCode::Left => MenuNav::Left,
        KeyCode::Right => MenuNav::Right,
        KeyCode::Enter => MenuNav::Activate,
        KeyCode::Esc | MENU_KEY => MenuNav::Cancel,
        KeyCode::Char(c) if !key.mods.contains(KeyModifiers::CTRL) => MenuNav::Mnemonic(c),
        _ => return None,
    })
}

fn text_key(bar: &MenuBar, key: &KeyEvent) -> Option<Action> {
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let alt = key.mods.contains(KeyModifiers::ALT);
    let extend = key.mods.contains(KeyModifiers::SHIFT);
    let motion = |kind| Some(Action::Motion { kind, extend });
    match key.code {
        MENU_KEY => Some(Action::OpenMenu(0)),
        KeyCode::Char(c) if alt && !ctrl => bar.index_of_mnemonic(c).map(Action::OpenMenu),
        KeyCode::Char(c) if key.mods.contains(ALT_GR) => Some(
            bar.command_for_shortcut(c)
                .map(Action::Command)
                .unwrap_or_else(|| Action::Edit(EditKind::InsertText(c.to_string()))),
        ),
        KeyCode::Char(c) if ctrl => match c {
            'a' => Some(Action::SelectAll),
            'q' => Some(Action::Command(MenuCommand::Exit)),
            other => bar.command_for_shortcut(other).map(Action::Command),
        },
        KeyCode::Char(c) => Some(Action::Edit(EditKind::InsertText(c.to_string()))),
        KeyCode::Enter => Some(Action::Edit(EditKind::InsertNewline)),
        KeyCode::Tab if !extend => Some(Action::Edit(EditKind::InsertTab)),
        KeyCode::Tab => None,
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Delete => Some(Action::Edit(EditKind::Delete)),
        KeyCode::Esc => None,
        KeyCode::Left => motion(MotionKind::Left),
        KeyCode::Right => motion(MotionKind::Right),
        KeyCode::Up => motion(MotionKind::Up),
        KeyCode::Down => motion(MotionKind::Down),
        KeyCode::Home if ctrl => motion(MotionKind::DocStart),
        KeyCode::End if ctrl => motion(MotionKind::DocEnd),
        KeyCode::Home => motion(MotionKind::LineStart),
        KeyCode::End => motion(MotionKind::LineEnd),
        KeyCode::PageUp => motion(MotionKind::PageUp),
        KeyCode::PageDown => motion(MotionKind::PageDown),
        KeyCode::F(_) => Some(Action::Checkpoint(CheckpointReason::ActionKey)),
    }
}
