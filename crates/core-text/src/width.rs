//! Grapheme cluster display width.
//!
//! `egc_width` is the single authoritative answer to "how many terminal cells
//! does this cluster occupy". Rendering, caret placement and vertical motion
//! all route through it so they never disagree.
//!
//! Invariants:
//! - Control characters (other than tab, which callers expand) occupy one cell
//!   because the renderer substitutes a visible placeholder for them.
//! - Pictographic clusters are biased toward width 2. Over-estimation only
//!   leaves a blank cell; under-estimation causes render drift.

use unicode_width::UnicodeWidthStr;

/// Tab stops every four columns.
pub const TAB_STOP: usize = 4;

/// Width in terminal cells of a single extended grapheme cluster.
pub fn egc_width(egc: &str) -> u16 {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if first.is_control() {
        return 1;
    }
    let base = UnicodeWidthStr::width(egc) as u16;
    if is_pictographic(first) || egc.contains('\u{200D}') || egc.contains('\u{FE0F}') {
        return 2;
    }
    base.max(1)
}

fn is_pictographic(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1F5FF
        | 0x1F600..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF
        | 0x1F1E6..=0x1F1FF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_cell() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width(" "), 1);
    }

    #[test]
    fn cjk_is_two_cells() {
        assert_eq!(egc_width("漢"), 2);
    }

    #[test]
    fn combining_sequence_is_one_cell() {
        assert_eq!(egc_width("e\u{301}"), 1);
    }

    #[test]
    fn emoji_is_two_cells() {
        assert_eq!(egc_width("\u{1F600}"), 2);
        assert_eq!(egc_width("\u{1F468}\u{200D}\u{1F469}"), 2);
    }

    #[test]
    fn control_is_placeholder_cell() {
        assert_eq!(egc_width("\u{7}"), 1);
        assert_eq!(egc_width(""), 0);
    }
}
