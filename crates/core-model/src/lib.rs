//! Window model: editor state plus everything about how it is presented.
//!
//! `EditorState` knows the document, history, style and file. `EditorModel`
//! adds the window concerns around it: the scroll position of the text
//! surface (`View`), the menu bar and its navigation state, the modal dialog
//! if one is open, the screen layout, and the armed-exit flag.
//!
//! Invariants (must hold after every public call):
//! * At most one of "menu open" and "dialog open" is true.
//! * `view.first_line` never exceeds the last document line.
//! * Auto-scroll keeps the caret inside the text band whenever the band is
//!   non-empty.

use core_menu::{MenuBar, MenuState};
use core_state::EditorState;
use core_text::grapheme;

mod dialog;
mod layout;
pub use dialog::{
    ColorChooser, Dialog, DialogKey, DialogOutcome, PathPrompt, PathPurpose,
};
pub use layout::{Layout, LayoutRegion};

/// Scroll position of the text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub first_line: usize,
    /// First visible display column (horizontal scroll, tab-expanded).
    pub first_col: usize,
    /// Text band height recorded at the last auto-scroll; used for paging.
    pub last_text_height: usize,
}

/// Which component receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiContext {
    Text,
    Menu,
    Dialog,
}

pub struct EditorModel {
    state: EditorState,
    pub view: View,
    menu_bar: MenuBar,
    pub menu: MenuState,
    pub dialog: Option<Dialog>,
    pub layout: Layout,
    /// A first Exit on a modified document arms this; the next consecutive Exit quits.
    pub exit_armed: bool,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            view: View::default(),
            menu_bar: MenuBar::standard(),
            menu: MenuState::default(),
            dialog: None,
            layout: Layout::default(),
            exit_armed: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    /// Disjoint borrows of the menu bar and its navigation state.
    pub fn menu_parts(&mut self) -> (&MenuBar, &mut MenuState) {
        (&self.menu_bar, &mut self.menu)
    }

    pub fn ui_context(&self) -> UiContext {
        if self.dialog.is_some() {
            UiContext::Dialog
        } else if self.menu.is_open() {
            UiContext::Menu
        } else {
            UiContext::Text
        }
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.menu.close();
        tracing::debug!(target: "model", title = %dialog.title(), "dialog_open");
        self.dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = Layout::for_terminal(width, height);
    }

    /// `name*  - Quill` (asterisk while modified).
    pub fn window_title(&self) -> String {
        let marker = if self.state.modified { "*" } else { "" };
        format!("{}{} - Quill", self.state.display_name(), marker)
    }

    /// Keep the caret inside the text band. Returns true if the view scrolled.
    pub fn auto_scroll(&mut self) -> bool {
        let height = self.layout.text.height as usize;
        let width = self.layout.text.width as usize;
        self.view.last_text_height = height;
        let doc = self.state.document();
        let caret = doc.position_of(doc.caret());
        let col = doc
            .line(caret.line)
            .map_or(0, |l| grapheme::visual_col(l, caret.byte));
        let mut changed = false;
        if let Some(first) = compute_scroll_intent(self.view.first_line, caret.line, height) {
            self.view.first_line = first;
            changed = true;
        }
        if let Some(first) = compute_scroll_intent(self.view.first_col, col, width) {
            self.view.first_col = first;
            changed = true;
        }
        let last_line = doc.line_count().saturating_sub(1);
        if self.view.first_line > last_line {
            self.view.first_line = last_line;
            changed = true;
        }
        changed
    }
}

/// Compute the first visible index that keeps `cursor` inside a window of
/// `extent` cells starting at `first`. Used for both rows and columns.
///
/// Returns `None` when no scroll is needed or the window is empty.
pub fn compute_scroll_intent(first: usize, cursor: usize, extent: usize) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    if cursor < first {
        return Some(cursor);
    }
    if cursor >= first + extent {
        return Some(cursor + 1 - extent);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{ColorTarget, EditorState};
    use core_text::{Document, Selection};

    fn model(text: &str, w: u16, h: u16) -> EditorModel {
        let mut m = EditorModel::new(EditorState::new(Document::from_str(text)));
        m.resize(w, h);
        m
    }

    #[test]
    fn starts_in_text_context() {
        let m = model("hello\n", 80, 24);
        assert_eq!(m.ui_context(), UiContext::Text);
        assert_eq!(m.view, View::default());
        assert_eq!(m.window_title(), "Untitled - Quill");
    }

    #[test]
    fn dialog_wins_over_menu() {
        let mut m = model("", 80, 24);
        let (bar, menu) = m.menu_parts();
        menu.open(bar, 0);
        assert_eq!(m.ui_context(), UiContext::Menu);
        m.open_dialog(Dialog::Color(ColorChooser::new(ColorTarget::Foreground, None)));
        assert_eq!(m.ui_context(), UiContext::Dialog);
        assert!(!m.menu.is_open());
        m.close_dialog();
        assert_eq!(m.ui_context(), UiContext::Text);
    }

    #[test]
    fn auto_scroll_down_and_up() {
        // 5 text rows: menu + 5 + status.
        let mut m = model("0\n1\n2\n3\n4\n5\n6\n7\n8\n9\n", 80, 7);
        assert!(!m.auto_scroll());
        let at = |m: &EditorModel, line| m.state().document().line_start(line);
        let off = at(&m, 4);
        m.state_mut().set_selection(Selection::caret(off));
        assert!(!m.auto_scroll());
        let off = at(&m, 5);
        m.state_mut().set_selection(Selection::caret(off));
        assert!(m.auto_scroll());
        assert_eq!(m.view.first_line, 1);
        let off = at(&m, 9);
        m.state_mut().set_selection(Selection::caret(off));
        assert!(m.auto_scroll());
        assert_eq!(m.view.first_line, 5);
        let off = at(&m, 3);
        m.state_mut().set_selection(Selection::caret(off));
        assert!(m.auto_scroll());
        assert_eq!(m.view.first_line, 3);
        assert_eq!(m.view.last_text_height, 5);
    }

    #[test]
    fn auto_scroll_horizontal_follows_tabs() {
        let mut m = model("\t\tabcdef", 6, 3);
        let end = m.state().document().len();
        m.state_mut().set_selection(Selection::caret(end));
        assert!(m.auto_scroll());
        // tabs expand to col 8, caret at col 14 -> first_col = 14 + 1 - 6
        assert_eq!(m.view.first_col, 9);
        m.state_mut().set_selection(Selection::caret(0));
        assert!(m.auto_scroll());
        assert_eq!(m.view.first_col, 0);
    }

    #[test]
    fn title_marks_modified() {
        let mut m = model("", 80, 24);
        m.state_mut().edit(|d| d.replace_selection("x"));
        assert_eq!(m.window_title(), "Untitled* - Quill");
    }

    #[test]
    fn compute_scroll_intent_cases() {
        assert_eq!(compute_scroll_intent(0, 3, 10), None);
        assert_eq!(compute_scroll_intent(10, 4, 5), Some(4));
        assert_eq!(compute_scroll_intent(0, 5, 5), Some(1));
        assert_eq!(compute_scroll_intent(0, 5, 0), None);
    }
}
