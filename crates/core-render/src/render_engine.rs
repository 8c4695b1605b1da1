//! Render engine: builds a frame from the model and emits it.
//!
//! The engine keeps the previously emitted frame. A frame identical to the
//! previous one is skipped entirely; otherwise only rows that differ are
//! repainted. A size change or an explicit `invalidate` forces a full repaint
//! (clear + every row).

use crate::writer::{WriteStats, Writer};
use crate::{Frame, compose, timing};
use anyhow::Result;
use core_model::EditorModel;
use crossterm::{
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::Instant;

/// Counters across the engine's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMetrics {
    pub full_frames: u64,
    pub partial_frames: u64,
    pub skipped_frames: u64,
    pub rows_repainted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Full,
    Partial,
    Skipped,
}

#[derive(Default)]
pub struct RenderEngine {
    prev: Option<Frame>,
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    /// Drop the cached frame so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn render<W: Write>(&mut self, model: &EditorModel, out: &mut W) -> Result<RenderPath> {
        let start = Instant::now();
        let frame = compose::build_frame(model);
        let path = self.emit(frame, out)?;
        timing::record_last_render_ns(start.elapsed().as_nanos() as u64);
        Ok(path)
    }

    /// Emit `frame`, diffing against the previous one.
    pub fn emit<W: Write>(&mut self, frame: Frame, out: &mut W) -> Result<RenderPath> {
        let same_size = self
            .prev
            .as_ref()
            .is_some_and(|p| p.width == frame.width && p.height == frame.height);
        if self.prev.as_ref() == Some(&frame) {
            self.metrics.skipped_frames += 1;
            return Ok(RenderPath::Skipped);
        }
        let rows: Vec<u16> = match (&self.prev, same_size) {
            (Some(prev), true) => (0..frame.height)
                .filter(|&y| row_cells(prev, y) != row_cells(&frame, y))
                .collect(),
            _ => (0..frame.height).collect(),
        };
        let path = if same_size {
            RenderPath::Partial
        } else {
            queue!(out, Clear(ClearType::All))?;
            RenderPath::Full
        };
        let stats = write_rows(&frame, &rows, out)?;
        tracing::trace!(
            target: "render",
            ?path,
            rows = rows.len(),
            prints = stats.print_commands,
            style_changes = stats.style_changes,
            "frame"
        );
        match path {
            RenderPath::Full => self.metrics.full_frames += 1,
            RenderPath::Partial => self.metrics.partial_frames += 1,
            RenderPath::Skipped => {}
        }
        self.metrics.rows_repainted += rows.len() as u64;
        self.prev = Some(frame);
        Ok(path)
    }
}

fn row_cells(frame: &Frame, y: u16) -> &[crate::Cell] {
    let w = frame.width as usize;
    let start = y as usize * w;
    &frame.cells[start..start + w]
}

fn write_rows<W: Write>(frame: &Frame, rows: &[u16], out: &mut W) -> Result<WriteStats> {
    let mut writer = Writer::new();
    for &y in rows {
        writer.move_to(0, y);
        for (cluster, _w, style, _x) in frame.row_leaders(y) {
            writer.print(cluster, style);
        }
    }
    writer.show_cursor(frame.cursor);
    writer.flush_to(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;
    use core_text::Document;

    fn model(text: &str) -> EditorModel {
        let mut m = EditorModel::new(EditorState::new(Document::from_str(text)));
        m.resize(40, 6);
        m
    }

    #[test]
    fn first_frame_is_full_then_unchanged_is_skipped() {
        let m = model("hello");
        let mut eng = RenderEngine::new();
        let mut out = Vec::new();
        assert_eq!(eng.render(&m, &mut out).unwrap(), RenderPath::Full);
        assert_eq!(eng.metrics().rows_repainted, 6);
        out.clear();
        assert_eq!(eng.render(&m, &mut out).unwrap(), RenderPath::Skipped);
        assert!(out.is_empty());
        assert!(timing::last_render_ns() > 0);
    }

    #[test]
    fn typing_repaints_only_changed_rows() {
        let mut m = model("hello\nworld");
        let mut eng = RenderEngine::new();
        let mut out = Vec::new();
        eng.render(&m, &mut out).unwrap();
        m.state_mut().edit(|d| d.replace_selection("X"));
        let before = eng.metrics().rows_repainted;
        assert_eq!(eng.render(&m, &mut out).unwrap(), RenderPath::Partial);
        // The edited text row plus the status line (modified marker).
        assert_eq!(eng.metrics().rows_repainted - before, 2);
    }

    #[test]
    fn resize_and_invalidate_force_full() {
        let mut m = model("x");
        let mut eng = RenderEngine::new();
        let mut out = Vec::new();
        eng.render(&m, &mut out).unwrap();
        m.resize(50, 8);
        assert_eq!(eng.render(&m, &mut out).unwrap(), RenderPath::Full);
        eng.invalidate();
        assert_eq!(eng.render(&m, &mut out).unwrap(), RenderPath::Full);
        assert_eq!(eng.metrics().full_frames, 3);
    }
}
