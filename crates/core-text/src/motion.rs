//! Caret motion helpers.
//!
//! These operate purely on a `Document` and an absolute offset and are free of
//! editor state. Vertical motions keep the visual column where possible; the
//! caller owns any "sticky column" memory.

use crate::{Document, Position, grapheme};

/// Move left one grapheme cluster (crossing line breaks).
pub fn left(doc: &Document, offset: usize) -> usize {
    grapheme::prev_boundary(doc.text(), offset)
}

/// Move right one grapheme cluster (crossing line breaks).
pub fn right(doc: &Document, offset: usize) -> usize {
    grapheme::next_boundary(doc.text(), offset)
}

/// Start of the caret's line.
pub fn line_start(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_of(offset);
    doc.line_start(pos.line)
}

/// End of the caret's line (before the newline).
pub fn line_end(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_of(offset);
    let len = doc.line(pos.line).map(str::len).unwrap_or(0);
    doc.line_start(pos.line) + len
}

/// Move `delta` lines vertically (negative = up), preserving the visual column.
/// Moving past the first/last line lands on the document start/end.
pub fn vertical(doc: &Document, offset: usize, delta: isize) -> usize {
    let pos = doc.position_of(offset);
    let line_text = doc.line(pos.line).unwrap_or("");
    let col = grapheme::visual_col(line_text, pos.byte);
    let last_line = doc.line_count().saturating_sub(1);
    let target = pos.line as isize + delta;
    if target < 0 {
        return 0;
    }
    if target as usize > last_line {
        return doc.len();
    }
    let target = target as usize;
    let target_text = doc.line(target).unwrap_or("");
    let byte = grapheme::byte_at_col(target_text, col);
    doc.offset_of(Position::new(target, byte))
}
