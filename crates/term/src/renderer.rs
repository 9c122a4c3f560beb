//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The screen has a fixed size, so it is presented at an origin that keeps it
//! centered. Frames are diffed against the previously presented one and only
//! changed runs are written; a moved origin or a resize forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Palette, Rgb, Shade};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    palette: Palette,
    last: Option<FrameBuffer>,
    origin: (u16, u16),
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            stdout: io::stdout(),
            palette,
            last: None,
            origin: (0, 0),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
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

    /// Force the next present to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present a frame centered in a terminal of `term_size` cells.
    pub fn present(&mut self, fb: &FrameBuffer, term_size: (u16, u16)) -> Result<()> {
        let origin = centered_origin(fb, term_size);
        if origin != self.origin {
            self.origin = origin;
            self.last = None;
        }

        self.buf.clear();
        let same_size = matches!(
            &self.last,
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height()
        );
        if let (true, Some(prev)) = (same_size, self.last.as_mut()) {
            encode_diff_into(prev, fb, origin, &self.palette, &mut self.buf)?;
            prev.clone_from(fb);
        } else {
            encode_full_into(fb, origin, &self.palette, &mut self.buf)?;
            self.last = Some(fb.clone());
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
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

/// Top-left corner that centers `fb` in a terminal of `term_size` cells.
pub fn centered_origin(fb: &FrameBuffer, term_size: (u16, u16)) -> (u16, u16) {
    let (w, h) = term_size;
    (
        w.saturating_sub(fb.width()) / 2,
        h.saturating_sub(fb.height()) / 2,
    )
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(
    fb: &FrameBuffer,
    origin: (u16, u16),
    palette: &Palette,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(SetBackgroundColor(rgb_to_color(palette.background)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current: Option<Shade> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(origin.0, origin.1 + y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some(cell.shade) {
                apply_shade_into(out, palette, cell.shade)?;
                current = Some(cell.shade);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// Writes nothing at all when the frames are identical.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    origin: (u16, u16),
    palette: &Palette,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current: Option<Shade> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(origin.0 + x, origin.1 + y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current != Some(cell.shade) {
                apply_shade_into(out, palette, cell.shade)?;
                current = Some(cell.shade);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if current.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_shade_into(out: &mut Vec<u8>, palette: &Palette, shade: Shade) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(palette.color(shade))))?;
    out.queue(SetBackgroundColor(rgb_to_color(palette.background)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if shade == Shade::Lit {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ
///
/// Frames of different sizes are reported as whole rows of `next`.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let width = next.width() as usize;
    if width == 0 {
        return Ok(());
    }
    let resized = prev.width() != next.width() || prev.height() != next.height();

    for (y, row) in next.cells().chunks(width).enumerate() {
        let y = y as u16;
        if resized {
            f(0, y, next.width())?;
            continue;
        }
        let old = &prev.cells()[y as usize * width..][..width];

        let mut x = 0;
        while x < width {
            if row[x] == old[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && row[x] != old[x] {
                x += 1;
            }
            f(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}
