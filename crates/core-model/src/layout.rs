//! Screen geometry.
//!
//! The terminal is split into three fixed bands: the menu bar on row 0, the
//! text surface, and the status line on the last row. Dropdowns and dialogs are
//! overlays drawn on top of the text band and do not take space from it.
//!
//! Invariants:
//! * Bands never overlap and together cover `height` rows when `height >= 2`.
//! * Width/height may be 0 (degenerate); the text band then has zero height.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub menu_bar: LayoutRegion,
    pub text: LayoutRegion,
    pub status: LayoutRegion,
}

impl Layout {
    pub fn for_terminal(width: u16, height: u16) -> Self {
        let menu_rows = height.min(1);
        let status_rows = height.saturating_sub(menu_rows).min(1);
        let text_rows = height.saturating_sub(menu_rows + status_rows);
        Self {
            width,
            height,
            menu_bar: LayoutRegion::new(0, 0, width, menu_rows),
            text: LayoutRegion::new(0, menu_rows, width, text_rows),
            status: LayoutRegion::new(0, menu_rows + text_rows, width, status_rows),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_terminal(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_terminal() {
        let l = Layout::for_terminal(80, 24);
        assert_eq!(l.menu_bar, LayoutRegion::new(0, 0, 80, 1));
        assert_eq!(l.text, LayoutRegion::new(0, 1, 80, 22));
        assert_eq!(l.status, LayoutRegion::new(0, 23, 80, 1));
    }

    #[test]
    fn tiny_terminal_degrades() {
        let l = Layout::for_terminal(10, 2);
        assert!(l.text.is_empty());
        assert_eq!(l.status.y, 1);
        let zero = Layout::for_terminal(0, 0);
        assert!(zero.text.is_empty());
        assert!(zero.menu_bar.is_empty());
    }
}
