//! Status line composition.
//!
//! Format: ` <name>[*]  Ln X, Col Y  <Family> <Size>pt <Weight>` on the left,
//! the current notice right-aligned when it fits.
//! * `<name>` is the base file name or `Untitled`.
//! * `*` appears only while the document is modified.
//!
//! Two stages: `compose_status` produces ordered `StatusSegment`s, then
//! `format_status` renders them. The notice is placed separately because its
//! position depends on the available width.

use crate::{CellFlags, CellStyle, Frame};
use core_model::EditorModel;
use core_text::grapheme;
use std::borrow::Cow;

/// What the status line needs, independent of the model types.
pub struct StatusContext<'a> {
    pub name: Cow<'a, str>,
    pub modified: bool,
    /// 0-based line index of the caret.
    pub line: usize,
    /// 0-based visual column of the caret.
    pub col: usize,
    pub style: String,
    pub notice: Option<&'a str>,
}

impl<'a> StatusContext<'a> {
    pub fn from_model(model: &'a EditorModel) -> Self {
        let state = model.state();
        let doc = state.document();
        let caret = doc.position_of(doc.caret());
        let col = doc
            .line(caret.line)
            .map_or(0, |l| grapheme::visual_col(l, caret.byte));
        Self {
            name: Cow::Owned(state.display_name()),
            modified: state.modified,
            line: caret.line,
            col,
            style: state.style.describe(),
            notice: state.ephemeral_status.as_ref().map(|m| m.text.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    /// File name with the modified marker already applied.
    FileName(Cow<'a, str>),
    /// 1-based caret line and column.
    Position { line_1: usize, col_1: usize },
    Style(&'a str),
}

pub fn compose_status<'a>(ctx: &'a StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = if ctx.modified {
        format!("{}*", ctx.name).into()
    } else {
        Cow::Borrowed(ctx.name.as_ref())
    };
    vec![
        StatusSegment::FileName(name),
        StatusSegment::Position {
            line_1: ctx.line + 1,
            col_1: ctx.col + 1,
        },
        StatusSegment::Style(&ctx.style),
    ]
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(64);
    for seg in segments {
        s.push_str(if s.is_empty() { " " } else { "  " });
        match seg {
            StatusSegment::FileName(n) => s.push_str(n),
            StatusSegment::Position { line_1, col_1 } => {
                s.push_str(&format!("Ln {line_1}, Col {col_1}"));
            }
            StatusSegment::Style(st) => s.push_str(st),
        }
    }
    s
}

fn width_of(s: &str) -> usize {
    grapheme::iter(s).map(|g| core_text::egc_width(g) as usize).sum()
}

/// Full status line for `width` columns: base text plus the right-aligned
/// notice. A notice that cannot fit next to the base replaces the style
/// segment, and is dropped only when even that leaves no room.
pub fn build_status_line(ctx: &StatusContext<'_>, width: u16) -> String {
    let width = width as usize;
    let mut base = format_status(&compose_status(ctx));
    let Some(notice) = ctx.notice else {
        return base;
    };
    let notice_w = width_of(notice);
    if width_of(&base) + 2 + notice_w > width {
        let segs = compose_status(ctx);
        base = format_status(&segs[..2]);
    }
    let base_w = width_of(&base);
    if base_w + 2 + notice_w <= width {
        let pad = width - notice_w - base_w - 1;
        base.extend(std::iter::repeat_n(' ', pad));
        base.push_str(notice);
        base.push(' ');
    }
    base
}

pub fn paint_status(frame: &mut Frame, model: &EditorModel) {
    let region = model.layout.status;
    if region.is_empty() {
        return;
    }
    let style = CellStyle::flags(CellFlags::REVERSE);
    frame.fill(region.x, region.x + region.width, region.y, style);
    let ctx = StatusContext::from_model(model);
    let line = build_status_line(&ctx, region.width);
    frame.put_str(region.x, region.y, &line, style, region.x + region.width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(modified: bool, notice: Option<&str>) -> StatusContext<'_> {
        StatusContext {
            name: "notes.txt".into(),
            modified,
            line: 2,
            col: 4,
            style: "Courier 12pt Plain".into(),
            notice,
        }
    }

    #[test]
    fn base_format() {
        assert_eq!(
            build_status_line(&ctx(false, None), 80),
            " notes.txt  Ln 3, Col 5  Courier 12pt Plain"
        );
        assert_eq!(
            build_status_line(&ctx(true, None), 80),
            " notes.txt*  Ln 3, Col 5  Courier 12pt Plain"
        );
    }

    #[test]
    fn notice_is_right_aligned() {
        let line = build_status_line(&ctx(false, Some("Saved notes.txt")), 80);
        assert_eq!(width_of(&line), 80);
        assert!(line.ends_with("Saved notes.txt "));
    }

    #[test]
    fn long_notice_displaces_style_segment() {
        let line = build_status_line(&ctx(false, Some("Unsaved changes")), 50);
        assert!(line.starts_with(" notes.txt  Ln 3, Col 5"));
        assert!(!line.contains("Courier"));
        assert!(line.ends_with("Unsaved changes "));
    }

    #[test]
    fn notice_dropped_when_no_room() {
        let line = build_status_line(&ctx(false, Some("a very long notice text")), 30);
        assert_eq!(line, " notes.txt  Ln 3, Col 5");
    }
}
