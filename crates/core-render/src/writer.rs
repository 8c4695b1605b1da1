//! Terminal writer.
//!
//! Collects primitive terminal operations for one frame and emits them in a
//! single flush. Consecutive prints under the same style are merged into one
//! `Print`, and style changes are only emitted when the style differs from the
//! previous one.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute with a (0,0) origin; callers ensure bounds.
//! * A `MoveTo` ends the current print run.

use crate::{CellFlags, CellStyle};
use anyhow::Result;
use core_state::Rgb;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Style(CellStyle),
    Print(String),
    ShowCursor,
    HideCursor,
}

/// Counters for the last flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub print_commands: u64,
    pub style_changes: u64,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
    pending: String,
    current: Option<CellStyle>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let s = std::mem::take(&mut self.pending);
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.flush_pending();
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print(&mut self, s: &str, style: CellStyle) {
        if s.is_empty() {
            return;
        }
        if self.current != Some(style) {
            self.flush_pending();
            self.cmds.push(Command::Style(style));
            self.current = Some(style);
        }
        self.pending.push_str(s);
    }

    pub fn show_cursor(&mut self, at: Option<(u16, u16)>) {
        self.flush_pending();
        match at {
            Some((x, y)) => {
                self.cmds.push(Command::MoveTo(x, y));
                self.cmds.push(Command::ShowCursor);
            }
            None => self.cmds.push(Command::HideCursor),
        }
    }

    /// Commands queued so far (pending print run included).
    pub fn commands(&mut self) -> &[Command] {
        self.flush_pending();
        &self.cmds
    }

    pub fn flush_to<W: Write>(mut self, out: &mut W) -> Result<WriteStats> {
        self.flush_pending();
        let mut stats = WriteStats::default();
        queue!(out, Hide)?;
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Style(style) => {
                    stats.style_changes += 1;
                    queue_style(out, style)?;
                }
                Command::Print(s) => {
                    stats.print_commands += 1;
                    queue!(out, Print(s))?;
                }
                Command::ShowCursor => queue!(out, Show)?,
                Command::HideCursor => queue!(out, Hide)?,
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()?;
        Ok(stats)
    }
}

fn color(rgb: Option<Rgb>) -> Color {
    match rgb {
        Some(Rgb { r, g, b }) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(color(style.fg)),
        SetBackgroundColor(color(style.bg))
    )?;
    for (flag, attr) in [
        (CellFlags::BOLD, Attribute::Bold),
        (CellFlags::ITALIC, Attribute::Italic),
        (CellFlags::REVERSE, Attribute::Reverse),
        (CellFlags::UNDERLINE, Attribute::Underlined),
    ] {
        if style.flags.contains(flag) {
            queue!(out, SetAttribute(attr))?;
        }
    }
    Ok(())
}
