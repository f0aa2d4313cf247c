//! TerminalRenderer: flushes frames to a real terminal.
//!
//! Only rows that changed since the previous frame are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::frame::{Frame, Glyph};
use crate::game_view::tint_color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to rewrite every row (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(last) if last.width() == frame.width() && last.height() == frame.height() => {
                encode_rows_into(frame, changed_rows(last, frame), &mut self.buf)?;
            }
            _ => {
                self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
                encode_rows_into(frame, 0..frame.height(), &mut self.buf)?;
            }
        }
        self.flush_buf()?;

        match &mut self.last {
            Some(last) => last.clone_from(frame),
            None => self.last = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows whose glyphs differ between two frames of the same size
pub fn changed_rows(prev: &Frame, next: &Frame) -> Vec<u16> {
    (0..next.height())
        .filter(|&y| prev.row(y) != next.row(y))
        .collect()
}

/// Encode whole rows of `frame` into `out` without touching stdout
pub fn encode_rows_into(
    frame: &Frame,
    rows: impl IntoIterator<Item = u16>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for y in rows {
        out.queue(cursor::MoveTo(0, y))?;
        let mut tint = None;
        for glyph in frame.row(y) {
            if glyph.tint != tint {
                apply_tint_into(out, glyph)?;
                tint = glyph.tint;
            }
            out.queue(Print(glyph.ch))?;
        }
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn apply_tint_into(out: &mut Vec<u8>, glyph: &Glyph) -> Result<()> {
    match glyph.tint {
        Some(color) => out.queue(SetForegroundColor(tint_color(color)))?,
        None => out.queue(ResetColor)?,
    };
    Ok(())
}
