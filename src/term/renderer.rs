//! Flushes framebuffers to a real terminal.
//!
//! Frames are diffed against the previous one at row granularity: any row
//! with a changed glyph is rewritten whole. Size changes and explicit
//! invalidation force a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::{FrameBuffer, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    /// Switch the terminal into game mode: raw input, alternate screen,
    /// hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call even if `enter` failed midway.
    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame. The buffer is swapped into internal state, so the
    /// caller can hand in a fresh frame every time without cloning here.
    pub fn draw(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != frame.width() || prev.height() != frame.height(),
            None => true,
        };

        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..frame.height() {
                self.draw_row(frame, y)?;
            }
        } else if let Some(prev) = self.last.take() {
            for y in 0..frame.height() {
                if frame.row(y) != prev.row(y) {
                    self.draw_row(frame, y)?;
                }
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        let (w, h) = (frame.width(), frame.height());
        self.last = Some(std::mem::replace(frame, FrameBuffer::new(w, h)));
        Ok(())
    }

    fn draw_row(&mut self, frame: &FrameBuffer, y: u16) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, y))?;

        let mut style: Option<(Rgb, Rgb, bool)> = None;
        for glyph in frame.row(y) {
            let wanted = (glyph.fg, glyph.bg, glyph.bold);
            if style != Some(wanted) {
                self.apply_style(glyph)?;
                style = Some(wanted);
            }
            self.stdout.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn apply_style(&mut self, glyph: &Glyph) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(to_color(glyph.fg)))?;
        self.stdout.queue(SetBackgroundColor(to_color(glyph.bg)))?;
        if glyph.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
