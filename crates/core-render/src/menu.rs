//! Menu bar row and dropdown overlay.
//!
//! Titles sit at `MenuBar::title_columns` so the bar and the dropdowns agree
//! on geometry. Items that reflect the current style (weight, size, family)
//! carry a check mark; the highlighted item is drawn in reverse video.

use crate::{CellFlags, CellStyle, Frame};
use core_menu::{ItemKind, MenuItem};
use core_model::EditorModel;
use core_state::StyleState;
use core_text::egc_width;

const CHECK: &str = "✓";
const SUBMENU_MARK: &str = "▸";

pub fn paint_menu_bar(frame: &mut Frame, model: &EditorModel) {
    let region = model.layout.menu_bar;
    if region.is_empty() {
        return;
    }
    let bar_style = CellStyle::flags(CellFlags::REVERSE);
    frame.fill(region.x, region.x + region.width, region.y, bar_style);
    let open = model.menu.current().map(|o| o.menu);
    let limit = region.x + region.width;
    for (idx, (menu, col)) in model
        .menu_bar()
        .menus()
        .iter()
        .zip(model.menu_bar().title_columns())
        .enumerate()
    {
        let style = if open == Some(idx) {
            CellStyle::PLAIN
        } else {
            bar_style
        };
        let x = region.x + col;
        let end = frame.put_str(x, region.y, &format!(" {} ", menu.title), style, limit);
        // Underline the mnemonic letter.
        if let Some(pos) = menu
            .title
            .chars()
            .position(|c| c.eq_ignore_ascii_case(&menu.mnemonic))
        {
            let mx = x + 1 + pos as u16;
            if mx < end {
                frame.apply_flags_span(mx, region.y, 1, CellFlags::UNDERLINE);
            }
        }
    }
}

/// Item text: check column, label, then the shortcut (or submenu marker).
fn item_columns(item: &MenuItem, style: &StyleState) -> (String, String) {
    let active = item.command_kind().is_some_and(|c| c.is_active(style));
    let left = format!("{} {}", if active { CHECK } else { " " }, item.label);
    let right = match &item.kind {
        ItemKind::Submenu(_) => SUBMENU_MARK.to_string(),
        ItemKind::Command(_) => item.shortcut_label().unwrap_or_default(),
    };
    (left, right)
}

fn text_width(s: &str) -> u16 {
    core_text::grapheme::iter(s).map(egc_width).sum()
}

/// Draw a bordered list of items at (x, y). Returns the box width.
fn paint_item_box(
    frame: &mut Frame,
    x: u16,
    y: u16,
    items: &[MenuItem],
    highlighted: Option<usize>,
    style: &StyleState,
) -> u16 {
    let rows: Vec<(String, String)> = items.iter().map(|i| item_columns(i, style)).collect();
    let inner = rows
        .iter()
        .map(|(l, r)| text_width(l) + if r.is_empty() { 0 } else { 2 + text_width(r) })
        .max()
        .unwrap_or(0)
        + 2;
    let w = inner + 2;
    let h = rows.len() as u16 + 2;
    let x = x.min(frame.width.saturating_sub(w));
    frame.draw_box(x, y, w, h, CellStyle::PLAIN);
    for (i, (left, right)) in rows.iter().enumerate() {
        let row = y + 1 + i as u16;
        let item_style = if highlighted == Some(i) {
            CellStyle::flags(CellFlags::REVERSE)
        } else {
            CellStyle::PLAIN
        };
        let limit = x + w - 1;
        frame.fill(x + 1, limit, row, item_style);
        frame.put_str(x + 2, row, left, item_style, limit);
        let rx = limit.saturating_sub(1 + text_width(right));
        frame.put_str(rx, row, right, item_style, limit);
    }
    w
}

pub fn paint_dropdown(frame: &mut Frame, model: &EditorModel) {
    let Some(open) = model.menu.current() else {
        return;
    };
    let Some(menu) = model.menu_bar().menu(open.menu) else {
        return;
    };
    let columns = model.menu_bar().title_columns();
    let x = columns.get(open.menu).copied().unwrap_or(0);
    let y = model.layout.menu_bar.y + 1;
    let style = &model.state().style;
    let highlighted = if open.submenu.is_some() {
        None
    } else {
        Some(open.item)
    };
    let w = paint_item_box(frame, x, y, &menu.items, highlighted, style);
    // Parent of an expanded submenu stays marked.
    let parent_row = y + 1 + open.item as u16;
    if open.submenu.is_some() {
        frame.apply_flags_span(x + 1, parent_row, w.saturating_sub(2), CellFlags::UNDERLINE);
    }
    if let (Some(sub), Some(children)) = (open.submenu, menu.items[open.item].children()) {
        let sub_y = parent_row.min(frame.height.saturating_sub(children.len() as u16 + 2));
        paint_item_box(frame, x + w, sub_y, children, Some(sub), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::build_frame;
    use core_menu::MenuNav;
    use core_state::{EditorState, FontWeight};
    use core_text::Document;

    fn model() -> EditorModel {
        let mut m = EditorModel::new(EditorState::new(Document::new()));
        m.resize(80, 24);
        m
    }

    #[test]
    fn bar_shows_all_titles() {
        let f = build_frame(&model());
        let row = f.row_text(0);
        for title in ["File", "Edit", "Font", "FontType", "Color", "Undo&Redo"] {
            assert!(row.contains(title), "{title} missing from {row:?}");
        }
    }

    #[test]
    fn dropdown_lists_items_with_shortcuts() {
        let mut m = model();
        let (bar, menu) = m.menu_parts();
        menu.open(bar, 0);
        let f = build_frame(&m);
        assert!(f.row_text(2).contains("New"));
        assert!(f.row_text(2).contains("^N"));
        assert!(f.row_text(5).contains("Exit"));
        let highlighted = f.cell(3, 2).unwrap();
        assert!(highlighted.style.flags.contains(CellFlags::REVERSE));
    }

    #[test]
    fn active_style_items_are_checked() {
        let mut m = model();
        m.state_mut().style.weight = FontWeight::Italic;
        let font = m.menu_bar().index_of_mnemonic('o').unwrap();
        let (bar, menu) = m.menu_parts();
        menu.open(bar, font);
        let f = build_frame(&m);
        let italic_row = (2..6).map(|y| f.row_text(y)).find(|r| r.contains("Italic"));
        assert!(italic_row.unwrap().contains(CHECK));
        let bold_row = (2..6).map(|y| f.row_text(y)).find(|r| r.contains("Bold"));
        assert!(!bold_row.unwrap().contains(CHECK));
    }

    #[test]
    fn size_submenu_opens_beside_parent() {
        let mut m = model();
        let font = m.menu_bar().index_of_mnemonic('o').unwrap();
        let (bar, menu) = m.menu_parts();
        menu.open(bar, font);
        for _ in 0..3 {
            menu.handle(bar, MenuNav::Down);
        }
        menu.handle(bar, MenuNav::Right);
        let f = build_frame(&m);
        let joined: String = (0..24).map(|y| f.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(joined.contains("28"));
        // The default size is checked.
        assert!((0..24).map(|y| f.row_text(y)).any(|r| r.contains(&format!("{CHECK} 12"))));
    }
}
