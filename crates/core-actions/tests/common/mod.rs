#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, MemoryClipboard, dispatch, translate_input};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Document;

/// A model plus the in-memory clipboard it talks to.
pub struct Harness {
    pub model: EditorModel,
    pub clipboard: MemoryClipboard,
}

impl Harness {
    pub fn new(text: &str) -> Self {
        Self {
            model: EditorModel::new(EditorState::new(Document::from_str(text))),
            clipboard: MemoryClipboard::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.model.state().document().text()
    }

    /// Translate and dispatch a raw input event the way the runtime loop does.
    pub fn input(&mut self, input: InputEvent) -> DispatchResult {
        let ctx = self.model.ui_context();
        match translate_input(ctx, self.model.menu_bar(), &input) {
            Some(action) => self.act(action),
            None => DispatchResult::clean(),
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> DispatchResult {
        self.input(InputEvent::Key(key))
    }

    pub fn act(&mut self, action: Action) -> DispatchResult {
        dispatch(action, &mut self.model, &mut self.clipboard)
    }

    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.key(KeyEvent::plain(KeyCode::Char(c)));
        }
    }

    pub fn ctrl(&mut self, c: char) -> DispatchResult {
        self.key(KeyEvent::ctrl(c))
    }

    pub fn shift(&mut self, code: KeyCode) -> DispatchResult {
        self.key(KeyEvent::new(code, KeyModifiers::SHIFT))
    }

    pub fn press(&mut self, code: KeyCode) -> DispatchResult {
        self.key(KeyEvent::plain(code))
    }

    pub fn notice(&self) -> Option<&str> {
        self.model
            .state()
            .ephemeral_status
            .as_ref()
            .map(|m| m.text.as_str())
    }
}
