//! Frame composition: text band plus the passes layered over it.

use crate::{CellFlags, CellStyle, Frame, dialog, menu, status};
use core_model::{EditorModel, UiContext};
use core_state::{FontWeight, StyleState};
use core_text::grapheme;

/// Base style of the text band derived from the editor's `StyleState`.
pub fn text_style(style: &StyleState) -> CellStyle {
    let flags = match style.weight {
        FontWeight::Bold => CellFlags::BOLD,
        FontWeight::Italic => CellFlags::ITALIC,
        FontWeight::Plain => CellFlags::empty(),
    };
    CellStyle {
        flags,
        fg: style.foreground,
        bg: style.background,
    }
}

/// Build the whole frame for the current model.
pub fn build_frame(model: &EditorModel) -> Frame {
    let layout = model.layout;
    let mut frame = Frame::new(layout.width, layout.height);
    paint_text(&mut frame, model);
    menu::paint_menu_bar(&mut frame, model);
    status::paint_status(&mut frame, model);
    if model.ui_context() != UiContext::Text {
        frame.cursor = None;
    }
    menu::paint_dropdown(&mut frame, model);
    if let Some(d) = &model.dialog {
        dialog::paint_dialog(&mut frame, d);
    }
    frame
}

/// Paint visible document lines into the text band, expanding tabs, applying
/// horizontal scroll and reverse-videoing the selection. Sets the frame cursor
/// to the caret when it is visible.
pub fn paint_text(frame: &mut Frame, model: &EditorModel) {
    let region = model.layout.text;
    if region.is_empty() {
        return;
    }
    let base = text_style(&model.state().style);
    let selected = base.with(CellFlags::REVERSE);
    for y in region.y..region.y + region.height {
        frame.fill(region.x, region.x + region.width, y, base);
    }
    let doc = model.state().document();
    let sel = doc.selection().range();
    let first_line = model.view.first_line;
    let first_col = model.view.first_col;
    let right = first_col + region.width as usize;
    // `line_start` clamps past the end, so scrolled-off documents draw nothing.
    let mut line_start = doc.line_start(first_line);
    let rows = if first_line < doc.line_count() { region.height } else { 0 };
    for (row, line) in (0..rows).zip(doc.text()[line_start..].split('\n')) {
        let y = region.y + row;
        let mut col = 0usize;
        let mut byte = 0usize;
        for g in grapheme::iter(line) {
            let w = grapheme::cluster_width_at(g, col);
            let abs = line_start + byte;
            let style = if sel.contains(&abs) { selected } else { base };
            if col + w > first_col && col < right {
                let x = region.x + col.saturating_sub(first_col) as u16;
                let fits = col >= first_col && col + w <= right;
                if g == "\t" || !fits {
                    let end = (col + w).min(right) - col.max(first_col);
                    frame.fill(x, x + end as u16, y, style);
                } else {
                    let (shown, cw) = crate::printable(g);
                    frame.set_cluster(x, y, shown, cw, style);
                }
            }
            col += w;
            byte += g.len();
            if col >= right {
                break;
            }
        }
        // Selected line break shows as one reverse cell past the line end.
        let eol = line_start + line.len();
        if eol < doc.len() && sel.contains(&eol) && col >= first_col && col < right {
            let x = region.x + (col - first_col) as u16;
            frame.fill(x, x + 1, y, selected);
        }
        line_start = eol + 1;
    }
    let caret = doc.position_of(doc.caret());
    let caret_col = doc
        .line(caret.line)
        .map_or(0, |l| grapheme::visual_col(l, caret.byte));
    if caret.line >= first_line
        && caret.line < first_line + region.height as usize
        && caret_col >= first_col
        && caret_col < right
    {
        frame.cursor = Some((
            region.x + (caret_col - first_col) as u16,
            region.y + (caret.line - first_line) as u16,
        ));
    }
}
