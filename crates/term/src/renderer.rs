//! Terminal output for framebuffers.
//!
//! Each frame is compared row by row with the one already on screen. A row
//! that changed is rewritten as a single span, from its first differing glyph
//! to its last; untouched rows cost nothing. The well and the panel counters
//! change a few cells at a time, so a frame is usually a handful of spans.
//! The first frame, and any frame after a resize or [`TerminalRenderer::invalidate`],
//! clears the screen and paints every row.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// What the terminal currently shows; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.shown = None;
        Ok(())
    }

    /// Undo everything `enter` did. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        execute!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Repaint everything on the next draw (terminal resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand back the buffer that was on screen before.
    ///
    /// The caller keeps one `FrameBuffer` and redraws into it every frame;
    /// the two buffers trade places so nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let shown = self
            .shown
            .take()
            .filter(|prev| prev.width() == fb.width() && prev.height() == fb.height());

        self.buf.clear();
        encode_frame(shown.as_ref(), fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.out.flush()?;
        }

        let mut spare = shown.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }
}

/// Encode the terminal commands that turn `shown` into `next`.
///
/// With no `shown` frame the screen is cleared and every row painted.
/// Writes nothing when the frames are identical.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    if shown.is_none() {
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All)
        )?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match shown {
            Some(shown) => changed_span(shown.row(y), row),
            None => Some((0, row.len())),
        };
        let Some((start, end)) = span else {
            continue;
        };

        queue!(out, cursor::MoveTo(start as u16, y))?;
        for glyph in &row[start..end] {
            pen.apply(out, glyph.style)?;
            queue!(out, Print(glyph.ch))?;
        }
    }

    if pen.style.is_some() {
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// `[start, end)` covering every glyph that differs between two rows.
fn changed_span(shown: &[Glyph], next: &[Glyph]) -> Option<(usize, usize)> {
    let start = shown.iter().zip(next).position(|(a, b)| a != b)?;
    let from_end = shown
        .iter()
        .rev()
        .zip(next.iter().rev())
        .position(|(a, b)| a != b)
        .unwrap_or(0);
    Some((start, next.len() - from_end))
}

/// Tracks the style last sent so only the parts that change are re-sent.
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: Style) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        let was_bold = prev.is_some_and(|p| p.bold);
        if was_bold && !style.bold {
            queue!(out, SetAttribute(Attribute::NormalIntensity))?;
        } else if style.bold && !was_bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(style.fg.into()))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(style.bg.into()))?;
        }
        Ok(())
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}
