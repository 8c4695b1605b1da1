//! Async input service: terminal events in, normalized `core_events::Event`s out.

mod async_service;
pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;

use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CMods,
};
use tokio::task::JoinHandle;

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}

/// Translate one crossterm event. Returns `None` for events the editor ignores
/// (mouse, key releases, keys without a logical mapping).
pub fn translate_event(ev: CEvent) -> Option<InputEvent> {
    match ev {
        CEvent::Key(key) => map_key_event(&key).map(InputEvent::Key),
        CEvent::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        CEvent::Paste(data) => Some(InputEvent::Paste(data)),
        CEvent::FocusGained => Some(InputEvent::FocusGained),
        CEvent::FocusLost => Some(InputEvent::FocusLost),
        CEvent::Mouse(_) => None,
    }
}

pub fn map_key_event(key: &CKeyEvent) -> Option<KeyEvent> {
    if !matches!(key.kind, CKind::Press | CKind::Repeat) {
        return None;
    }
    let mut mods = map_mods(key.modifiers);
    let code = match key.code {
        CKeyCode::Char(c) => {
            // Shift is already folded into the character; keep it only for chords.
            if mods == KeyModifiers::SHIFT {
                mods = KeyModifiers::empty();
            }
            KeyCode::Char(if mods.contains(KeyModifiers::CTRL) {
                c.to_ascii_lowercase()
            } else {
                c
            })
        }
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::BackTab => {
            mods |= KeyModifiers::SHIFT;
            KeyCode::Tab
        }
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(KeyEvent { code, mods })
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[inline]
pub(crate) fn log_paste(data: &str) {
    tracing::trace!(target: "input.paste", len = data.len(), "paste_event");
}
