//! Document model: a single `String` buffer plus a selection.
//!
//! The document is flat: there is no rope or line index, and every
//! query that needs lines walks the string. Offsets handed out by this crate
//! are absolute byte offsets that always sit on grapheme cluster boundaries,
//! so slicing `text()` with them never panics.
//!
//! Line endings are stored as `\n` only. Callers loading foreign text are
//! expected to normalize first (`core-state` does this on load).

use std::ops::Range;

pub mod motion;
pub mod width;

pub use width::egc_width;

/// A position inside the document expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
}

/// Selection expressed as an anchor (where selecting started) and a head
/// (where the caret is). An empty selection is just a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Half-open byte range covered by the selection.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// The editable document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    selection: Selection,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a document from an in-memory string slice. The caret starts at offset 0.
    pub fn from_str(content: &str) -> Self {
        Self {
            text: content.to_string(),
            selection: Selection::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret offset (selection head).
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    /// Replace the selection, snapping both ends onto valid grapheme boundaries.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection {
            anchor: self.snap(selection.anchor),
            head: self.snap(selection.head),
        };
    }

    /// Collapse the selection to a caret at `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(Selection::caret(offset));
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.text.len());
    }

    /// Selected text, or `None` for an empty selection.
    pub fn selected_text(&self) -> Option<&str> {
        if self.selection.is_empty() {
            None
        } else {
            Some(&self.text[self.selection.range()])
        }
    }

    /// Replace the whole content. The selection collapses to a caret clamped into the new text.
    pub fn set_text(&mut self, content: &str) {
        self.text.clear();
        self.text.push_str(content);
        let caret = self.selection.head;
        self.set_caret(caret);
    }

    /// Replace the whole content and selection at once (used when restoring snapshots).
    pub fn restore(&mut self, content: &str, selection: Selection) {
        self.text.clear();
        self.text.push_str(content);
        self.set_selection(selection);
    }

    /// Replace the selected span with `insert` and leave the caret after the inserted text.
    /// Returns true if the content changed.
    pub fn replace_selection(&mut self, insert: &str) -> bool {
        let range = self.selection.range();
        if range.is_empty() && insert.is_empty() {
            return false;
        }
        let caret = range.start + insert.len();
        self.text.replace_range(range, insert);
        self.selection = Selection::caret(caret);
        true
    }

    /// Remove and return the selected text. Empty selections return `None` and change nothing.
    pub fn take_selection(&mut self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        let range = self.selection.range();
        let removed = self.text[range.clone()].to_string();
        self.text.replace_range(range.clone(), "");
        self.selection = Selection::caret(range.start);
        Some(removed)
    }

    /// Backspace: delete the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.take_selection().is_some();
        }
        let caret = self.selection.head;
        if caret == 0 {
            return false;
        }
        let prev = grapheme::prev_boundary(&self.text, caret);
        self.text.replace_range(prev..caret, "");
        self.selection = Selection::caret(prev);
        true
    }

    /// Delete key: delete the selection, or the grapheme at the caret.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.take_selection().is_some();
        }
        let caret = self.selection.head;
        if caret >= self.text.len() {
            return false;
        }
        let next = grapheme::next_boundary(&self.text, caret);
        self.text.replace_range(caret..next, "");
        true
    }

    /// Number of lines. An empty document, or one ending with `\n`, still has a final (empty) line.
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count() + 1
    }

    /// Absolute byte offset where line `idx` starts (clamped to the last line).
    pub fn line_start(&self, idx: usize) -> usize {
        if idx == 0 {
            return 0;
        }
        self.text
            .match_indices('\n')
            .nth(idx - 1)
            .map(|(i, _)| i + 1)
            .unwrap_or_else(|| self.last_line_start())
    }

    /// Content of line `idx` without its trailing newline.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.text.split('\n').nth(idx)
    }

    /// Map an absolute offset to a (line, byte-in-line) position.
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let before = &self.text[..offset];
        let line = before.bytes().filter(|b| *b == b'\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Position {
            line,
            byte: offset - line_start,
        }
    }

    /// Map a (line, byte) position back to an absolute offset, clamping both axes.
    pub fn offset_of(&self, pos: Position) -> usize {
        let line_count = self.line_count();
        let line = pos.line.min(line_count.saturating_sub(1));
        let start = self.line_start(line);
        let len = self.line(line).map(str::len).unwrap_or(0);
        self.snap(start + pos.byte.min(len))
    }

    fn last_line_start(&self) -> usize {
        self.text.rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Clamp an offset into the text and move it back onto a grapheme boundary.
    fn snap(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        if grapheme::is_boundary(&self.text, offset) {
            offset
        } else {
            grapheme::prev_boundary(&self.text, offset)
        }
    }
}

/// Grapheme utilities. These are pure helpers operating on a string slice.
pub mod grapheme {
    use crate::egc_width;
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(s: &str, byte: usize) -> usize {
        if byte == 0 {
            return 0;
        }
        let byte = byte.min(s.len());
        let mut last = 0;
        for (idx, _) in s.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns s.len() if at or beyond end).
    pub fn next_boundary(s: &str, byte: usize) -> usize {
        if byte >= s.len() {
            return s.len();
        }
        for (idx, _) in s.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        s.len()
    }

    pub fn is_boundary(s: &str, byte: usize) -> bool {
        if byte == 0 || byte == s.len() {
            return true;
        }
        if !s.is_char_boundary(byte) {
            return false;
        }
        s.grapheme_indices(true).any(|(idx, _)| idx == byte)
    }

    /// Visual column (terminal cells) of `byte` within a single line, expanding tabs.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += cluster_width_at(g, col);
        }
        col
    }

    /// Byte offset within `line` whose visual column is the closest at or before `target`.
    pub fn byte_at_col(line: &str, target: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            let w = cluster_width_at(g, col);
            if col + w > target {
                return idx;
            }
            col += w;
        }
        line.len()
    }

    /// Width in terminal cells of this grapheme cluster when it starts at column `col`.
    pub fn cluster_width_at(g: &str, col: usize) -> usize {
        if g == "\t" {
            crate::width::TAB_STOP - (col % crate::width::TAB_STOP)
        } else {
            egc_width(g) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_and_positions() {
        let d = Document::from_str("hello\nworld\n");
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.line(0), Some("hello"));
        assert_eq!(d.line(1), Some("world"));
        assert_eq!(d.line(2), Some(""));
        assert_eq!(d.line_start(1), 6);
        assert_eq!(d.position_of(8), Position::new(1, 2));
        assert_eq!(d.offset_of(Position::new(1, 2)), 8);
        // Byte past the end of a line clamps to the line end.
        assert_eq!(d.offset_of(Position::new(0, 99)), 5);
    }

    #[test]
    fn replace_selection_inserts_at_caret() {
        let mut d = Document::from_str("ac");
        d.set_caret(1);
        assert!(d.replace_selection("b"));
        assert_eq!(d.text(), "abc");
        assert_eq!(d.caret(), 2);
    }

    #[test]
    fn replace_selection_replaces_span() {
        let mut d = Document::from_str("hello world");
        d.set_selection(Selection::new(6, 11));
        assert_eq!(d.selected_text(), Some("world"));
        d.replace_selection("there");
        assert_eq!(d.text(), "hello there");
        assert!(d.selection().is_empty());
    }

    #[test]
    fn take_selection_removes_text() {
        let mut d = Document::from_str("hello world");
        d.set_selection(Selection::new(11, 6));
        assert_eq!(d.take_selection().as_deref(), Some("world"));
        assert_eq!(d.text(), "hello ");
        assert_eq!(d.caret(), 6);
        assert_eq!(d.take_selection(), None);
    }

    #[test]
    fn delete_backward_removes_whole_cluster() {
        let mut d = Document::from_str("ae\u{301}");
        d.set_caret(d.len());
        assert!(d.delete_backward());
        assert_eq!(d.text(), "a");
        assert!(d.delete_backward());
        assert!(!d.delete_backward());
    }

    #[test]
    fn delete_forward_joins_lines() {
        let mut d = Document::from_str("ab\ncd");
        d.set_caret(2);
        assert!(d.delete_forward());
        assert_eq!(d.text(), "abcd");
        d.set_caret(4);
        assert!(!d.delete_forward());
    }

    #[test]
    fn selection_snaps_to_cluster_boundary() {
        let mut d = Document::from_str("e\u{301}x");
        d.set_caret(2);
        assert_eq!(d.caret(), 0);
        d.set_caret(100);
        assert_eq!(d.caret(), d.len());
    }

    #[test]
    fn set_text_clamps_caret() {
        let mut d = Document::from_str("a long line");
        d.set_caret(9);
        d.set_text("ab");
        assert_eq!(d.caret(), 2);
    }

    #[test]
    fn visual_col_expands_tabs() {
        assert_eq!(grapheme::visual_col("\tx", 1), 4);
        assert_eq!(grapheme::visual_col("ab\tx", 3), 4);
        assert_eq!(grapheme::byte_at_col("\tx", 4), 1);
        assert_eq!(grapheme::byte_at_col("\tx", 2), 0);
    }

    #[test]
    fn wide_cluster_columns() {
        let s = "a漢b";
        let after_wide = grapheme::next_boundary(s, 1);
        assert_eq!(grapheme::visual_col(s, after_wide), 3);
        assert_eq!(grapheme::byte_at_col(s, 2), 1);
    }
}
