//! Modal dialog overlay, centered over the frame.

use crate::{CellFlags, CellStyle, Frame};
use core_model::{ColorChooser, Dialog, PathPrompt};
use core_text::{egc_width, grapheme};

const PATH_HINT: &str = "Enter: OK  Esc: Cancel";
const COLOR_HINT: &str = "Up/Down: choose  Enter: apply  Esc: cancel";

/// Outer rectangle of a `w` x `h` box centered in the frame, shrunk to fit.
fn centered(frame: &Frame, w: u16, h: u16) -> (u16, u16, u16, u16) {
    let w = w.min(frame.width);
    let h = h.min(frame.height);
    ((frame.width - w) / 2, (frame.height - h) / 2, w, h)
}

fn paint_title(frame: &mut Frame, x: u16, y: u16, w: u16, title: &str) {
    let label = format!(" {title} ");
    frame.put_str(x + 2, y, &label, CellStyle::flags(CellFlags::BOLD), x + w.saturating_sub(1));
}

pub fn paint_dialog(frame: &mut Frame, dialog: &Dialog) {
    frame.cursor = None;
    match dialog {
        Dialog::Path(p) => paint_path_prompt(frame, &dialog.title(), p),
        Dialog::Color(c) => paint_color_chooser(frame, &dialog.title(), c),
    }
}

fn paint_path_prompt(frame: &mut Frame, title: &str, prompt: &PathPrompt) {
    let (x, y, w, h) = centered(frame, 60, 5);
    if w < 6 || h < 3 {
        return;
    }
    frame.draw_box(x, y, w, h, CellStyle::PLAIN);
    paint_title(frame, x, y, w, title);
    let field_x = x + 2;
    let field_w = w - 4;
    let row = y + 1;
    let field_style = CellStyle::flags(CellFlags::UNDERLINE);
    frame.fill(field_x, field_x + field_w, row, field_style);

    // Scroll the input so the caret stays inside the field.
    let input = prompt.input();
    let caret_col = grapheme::visual_col(input, prompt.cursor());
    let skip = caret_col.saturating_sub(field_w.saturating_sub(1) as usize);
    let mut col = 0usize;
    let mut start = 0usize;
    for g in grapheme::iter(input) {
        if col >= skip {
            break;
        }
        col += egc_width(g) as usize;
        start += g.len();
    }
    frame.put_str(field_x, row, &input[start..], field_style, field_x + field_w);
    frame.cursor = Some((field_x + (caret_col - col.min(caret_col)) as u16, row));
    if h >= 5 {
        frame.put_str(field_x, y + h - 2, PATH_HINT, CellStyle::PLAIN, x + w - 1);
    }
}

fn paint_color_chooser(frame: &mut Frame, title: &str, chooser: &ColorChooser) {
    let count = ColorChooser::option_count() as u16;
    let (x, y, w, h) = centered(frame, 46, count + 4);
    if w < 10 || h < 4 {
        return;
    }
    frame.draw_box(x, y, w, h, CellStyle::PLAIN);
    paint_title(frame, x, y, w, title);
    let visible = (h - 3) as usize;
    let selected = chooser.selected();
    let first = selected.saturating_sub(visible.saturating_sub(1));
    for (row, idx) in (first..ColorChooser::option_count()).take(visible).enumerate() {
        let Some((name, rgb)) = ColorChooser::option(idx) else {
            break;
        };
        let ry = y + 1 + row as u16;
        let style = if idx == selected {
            CellStyle::flags(CellFlags::REVERSE)
        } else {
            CellStyle::PLAIN
        };
        frame.fill(x + 1, x + w - 1, ry, style);
        let swatch = CellStyle {
            bg: rgb,
            ..CellStyle::PLAIN
        };
        frame.fill(x + 2, x + 4, ry, swatch);
        let label = match rgb {
            Some(c) => format!("{name} {c}"),
            None => name.to_string(),
        };
        frame.put_str(x + 5, ry, &label, style, x + w - 1);
    }
    frame.put_str(x + 2, y + h - 2, COLOR_HINT, CellStyle::PLAIN, x + w - 1);
}
