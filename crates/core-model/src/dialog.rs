//! Modal dialogs: the path prompt used by Open and Save, and the color chooser.
//!
//! A dialog owns all input while it is open. `Dialog::handle` consumes one
//! `DialogKey` and reports whether the dialog is still pending, was
//! cancelled, or produced a result for the dispatcher to act on.

use core_state::{ColorTarget, PALETTE, Rgb};
use core_text::grapheme;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPurpose {
    Open,
    Save,
}

impl PathPurpose {
    pub fn title(self) -> &'static str {
        match self {
            PathPurpose::Open => "Open File",
            PathPurpose::Save => "Save As",
        }
    }
}

/// Keys a dialog understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKey {
    Char(char),
    Text(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Cancelled,
    OpenPath(PathBuf),
    SavePath(PathBuf),
    ApplyColor(ColorTarget, Option<Rgb>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub purpose: PathPurpose,
    input: String,
    cursor: usize,
}

impl PathPrompt {
    pub fn new(purpose: PathPurpose, initial: impl Into<String>) -> Self {
        let input = initial.into();
        let cursor = input.len();
        Self {
            purpose,
            input,
            cursor,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset of the caret inside `input`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        self.input.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    fn handle(&mut self, key: DialogKey) -> DialogOutcome {
        match key {
            DialogKey::Char(c) => self.insert(c.encode_utf8(&mut [0u8; 4])),
            DialogKey::Text(s) => self.insert(&s),
            DialogKey::Backspace => {
                let prev = grapheme::prev_boundary(&self.input, self.cursor);
                self.input.replace_range(prev..self.cursor, "");
                self.cursor = prev;
            }
            DialogKey::Delete => {
                let next = grapheme::next_boundary(&self.input, self.cursor);
                self.input.replace_range(self.cursor..next, "");
            }
            DialogKey::Left => self.cursor = grapheme::prev_boundary(&self.input, self.cursor),
            DialogKey::Right => self.cursor = grapheme::next_boundary(&self.input, self.cursor),
            DialogKey::Home => self.cursor = 0,
            DialogKey::End => self.cursor = self.input.len(),
            DialogKey::Up | DialogKey::Down => {}
            DialogKey::Cancel => return DialogOutcome::Cancelled,
            DialogKey::Confirm => {
                let path = self.input.trim();
                if path.is_empty() {
                    return DialogOutcome::Pending;
                }
                let path = PathBuf::from(path);
                return match self.purpose {
                    PathPurpose::Open => DialogOutcome::OpenPath(path),
                    PathPurpose::Save => DialogOutcome::SavePath(path),
                };
            }
        }
        DialogOutcome::Pending
    }
}

/// Palette chooser. Row 0 is "Default" (terminal color); rows 1.. follow `PALETTE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorChooser {
    pub target: ColorTarget,
    selected: usize,
}

impl ColorChooser {
    pub fn new(target: ColorTarget, current: Option<Rgb>) -> Self {
        let selected = current
            .and_then(|rgb| PALETTE.iter().position(|(_, c)| *c == rgb))
            .map_or(0, |i| i + 1);
        Self { target, selected }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn option_count() -> usize {
        PALETTE.len() + 1
    }

    /// Label and color of row `idx`.
    pub fn option(idx: usize) -> Option<(&'static str, Option<Rgb>)> {
        match idx {
            0 => Some(("Default", None)),
            i => PALETTE.get(i - 1).map(|(name, rgb)| (*name, Some(*rgb))),
        }
    }

    fn handle(&mut self, key: DialogKey) -> DialogOutcome {
        let n = Self::option_count();
        match key {
            DialogKey::Up | DialogKey::Left => self.selected = (self.selected + n - 1) % n,
            DialogKey::Down | DialogKey::Right => self.selected = (self.selected + 1) % n,
            DialogKey::Home => self.selected = 0,
            DialogKey::End => self.selected = n - 1,
            DialogKey::Cancel => return DialogOutcome::Cancelled,
            DialogKey::Confirm => {
                let color = Self::option(self.selected).and_then(|(_, c)| c);
                return DialogOutcome::ApplyColor(self.target, color);
            }
            _ => {}
        }
        DialogOutcome::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Path(PathPrompt),
    Color(ColorChooser),
}

impl Dialog {
    pub fn title(&self) -> String {
        match self {
            Dialog::Path(p) => p.purpose.title().to_string(),
            Dialog::Color(c) => format!("{} Color", c.target.label()),
        }
    }

    pub fn handle(&mut self, key: DialogKey) -> DialogOutcome {
        match self {
            Dialog::Path(p) => p.handle(key),
            Dialog::Color(c) => c.handle(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_prompt_edits_and_confirms() {
        let mut d = Dialog::Path(PathPrompt::new(PathPurpose::Save, "notes.tx"));
        assert_eq!(d.handle(DialogKey::Char('t')), DialogOutcome::Pending);
        assert_eq!(
            d.handle(DialogKey::Confirm),
            DialogOutcome::SavePath(PathBuf::from("notes.txt"))
        );
    }

    #[test]
    fn path_prompt_cursor_editing() {
        let mut p = PathPrompt::new(PathPurpose::Open, "abé");
        p.handle(DialogKey::Left);
        p.handle(DialogKey::Backspace);
        assert_eq!(p.input(), "aé");
        p.handle(DialogKey::Home);
        p.handle(DialogKey::Delete);
        assert_eq!(p.input(), "é");
        p.handle(DialogKey::End);
        p.handle(DialogKey::Text("x\ny".into()));
        assert_eq!(p.input(), "éxy");
        assert_eq!(p.cursor(), p.input().len());
    }

    #[test]
    fn empty_path_stays_pending() {
        let mut d = Dialog::Path(PathPrompt::new(PathPurpose::Open, "  "));
        assert_eq!(d.handle(DialogKey::Confirm), DialogOutcome::Pending);
        assert_eq!(d.handle(DialogKey::Cancel), DialogOutcome::Cancelled);
    }

    #[test]
    fn color_chooser_starts_on_current_color() {
        let red = PALETTE.iter().find(|(n, _)| *n == "Red").unwrap().1;
        let c = ColorChooser::new(ColorTarget::Foreground, Some(red));
        assert_eq!(ColorChooser::option(c.selected()), Some(("Red", Some(red))));
        let d = ColorChooser::new(ColorTarget::Background, Some(Rgb::new(1, 2, 3)));
        assert_eq!(d.selected(), 0);
    }

    #[test]
    fn color_chooser_wraps_and_applies() {
        let mut d = Dialog::Color(ColorChooser::new(ColorTarget::Background, None));
        d.handle(DialogKey::Up);
        let last = PALETTE[PALETTE.len() - 1].1;
        assert_eq!(
            d.handle(DialogKey::Confirm),
            DialogOutcome::ApplyColor(ColorTarget::Background, Some(last))
        );
        let mut d = Dialog::Color(ColorChooser::new(ColorTarget::Foreground, None));
        assert_eq!(
            d.handle(DialogKey::Confirm),
            DialogOutcome::ApplyColor(ColorTarget::Foreground, None)
        );
        assert_eq!(d.title(), "Foreground Color");
    }
}
