//! Rendering primitives, frame composition and terminal emission.
//!
//! A frame is a grid of `Cell`s. Leader cells hold a full grapheme cluster
//! and its visual width; continuation cells (width 0) fill the remaining
//! columns of a wide cluster and never print.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty, immediately right of its leader.
//! - Styles applied over a span mark leader and continuations alike; emission
//!   derives printable content from leaders only.
//! - Reverse video (selection, highlighted menu items) wraps whole clusters.
//!
//! Composition order, each pass painting over the previous one:
//! 1. `compose::paint_text` fills the text band using the `StyleState`
//!    (colors, bold / italic) and reverse-videos the selection.
//! 2. `menu::paint_menu_bar` draws row 0; `status::paint_status` the last row.
//! 3. `menu::paint_dropdown` overlays the open menu (and its submenu).
//! 4. `dialog::paint_dialog` overlays a modal dialog, centered.
//!
//! `RenderEngine` owns the previous frame and skips emission when nothing
//! changed; `writer::Writer` batches same-style runs into single prints.

use bitflags::bitflags;
use core_state::Rgb;
use core_text::{egc_width, grapheme};

pub mod compose;
pub mod dialog;
pub mod menu;
pub mod render_engine;
pub mod status;
pub mod timing;
pub mod writer;

pub use render_engine::RenderEngine;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const BOLD    = 0b0000_0001;
        const ITALIC  = 0b0000_0010;
        const REVERSE = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
    }
}

/// Attributes and colors of one cell. `None` colors mean terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub flags: CellFlags,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        flags: CellFlags::empty(),
        fg: None,
        bg: None,
    };

    pub fn flags(flags: CellFlags) -> Self {
        Self {
            flags,
            ..Self::PLAIN
        }
    }

    pub fn with(mut self, flags: CellFlags) -> Self {
        self.flags |= flags;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Full grapheme cluster (leader cells only). Empty for continuation cells.
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
    pub style: CellStyle,
}

impl Cell {
    #[inline]
    pub fn leader(cluster: &str, width: u16, style: CellStyle) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.max(1) as u8,
            style,
        }
    }
    #[inline]
    pub fn continuation(style: CellStyle) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            style,
        }
    }
    #[inline]
    pub fn blank(style: CellStyle) -> Self {
        Self::leader(" ", 1, style)
    }
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
    #[inline]
    pub fn visual_width(&self) -> u16 {
        self.width as u16
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(CellStyle::PLAIN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    /// Where the terminal cursor should be shown; `None` hides it.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            cursor: None,
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a full cluster at (x,y) and populate continuation cells for its width.
    pub fn set_cluster(&mut self, x: u16, y: u16, cluster: &str, width: u16, style: CellStyle) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = width.max(1).min(self.width - x);
        self.detach(x, y);
        self.detach(x + w - 1, y);
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(cluster, w, style);
        }
        for dx in 1..w {
            if let Some(c_idx) = self.index(x + dx, y) {
                self.cells[c_idx] = Cell::continuation(style);
            }
        }
    }

    /// Blank the parts of any wide cluster overlapping (x, y) so that writing
    /// a new cell there never leaves half a cluster behind.
    fn detach(&mut self, x: u16, y: u16) {
        let row = y as usize * self.width as usize;
        let x = x as usize;
        let width = self.width as usize;
        if self.cells[row + x].width == 0 {
            let mut lx = x;
            while lx > 0 && self.cells[row + lx].width == 0 {
                lx -= 1;
            }
            for i in lx..x {
                self.cells[row + i] = Cell::blank(self.cells[row + i].style);
            }
        }
        let mut rx = x + 1;
        while rx < width && self.cells[row + rx].width == 0 {
            self.cells[row + rx] = Cell::blank(self.cells[row + rx].style);
            rx += 1;
        }
    }

    /// Print `text` starting at column `x`, stopping before `limit`. Returns the
    /// column after the last cluster written. Clusters that would straddle
    /// `limit` are dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: CellStyle, limit: u16) -> u16 {
        let limit = limit.min(self.width);
        let mut col = x;
        for g in grapheme::iter(text) {
            let (shown, w) = printable(g);
            if col.saturating_add(w) > limit {
                break;
            }
            self.set_cluster(col, y, shown, w, style);
            col += w;
        }
        col
    }

    /// Fill `[x0, x1)` of row `y` with blanks in `style`.
    pub fn fill(&mut self, x0: u16, x1: u16, y: u16, style: CellStyle) {
        if y >= self.height {
            return;
        }
        for x in x0..x1.min(self.width) {
            self.detach(x, y);
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Cell::blank(style);
            }
        }
    }

    /// Apply additional flags over an existing span (leader + continuations).
    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].style.flags |= flags;
            }
        }
    }

    /// Blank a `w` x `h` rectangle and outline it with a single-line border.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        for row in y..=bottom {
            self.fill(x, x + w, row, style);
            self.set_cluster(x, row, "│", 1, style);
            self.set_cluster(right, row, "│", 1, style);
        }
        for col in x + 1..right {
            self.set_cluster(col, y, "─", 1, style);
            self.set_cluster(col, bottom, "─", 1, style);
        }
        self.set_cluster(x, y, "┌", 1, style);
        self.set_cluster(right, y, "┐", 1, style);
        self.set_cluster(x, bottom, "└", 1, style);
        self.set_cluster(right, bottom, "┘", 1, style);
    }

    /// Iterate leader cells of a row, yielding (cluster, width, style, start_x).
    pub fn row_leaders(&self, y: u16) -> impl Iterator<Item = (&str, u16, CellStyle, u16)> + '_ {
        let width = self.width;
        let start = y as usize * width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            while x < width {
                let cell = &self.cells[start + x as usize];
                if cell.is_leader() {
                    let w = cell.visual_width();
                    let out = (&*cell.cluster, w, cell.style, x);
                    x = x.saturating_add(w);
                    return Some(out);
                }
                x += 1;
            }
            None
        })
    }

    /// Row `y` as plain text (diagnostics and tests).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        self.row_leaders(y).map(|(c, _, _, _)| c).collect()
    }
}

/// Visible stand-in and width for a cluster. Control characters other than
/// tab (which callers expand) show as `?`.
pub(crate) fn printable(g: &str) -> (&str, u16) {
    if g.chars().next().is_some_and(char::is_control) {
        ("?", 1)
    } else {
        (g, egc_width(g).max(1))
    }
}
