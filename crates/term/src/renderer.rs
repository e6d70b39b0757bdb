//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is encoded into a reusable byte buffer and written in one go.
//! After the first frame only the runs of cells that changed are sent, and
//! style escapes are emitted only for the parts of the style that differ from
//! what the terminal already has.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            bytes: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode plus the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(
            self.bytes,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.send()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.send()?;
        terminal::disable_raw_mode()?;
        self.shown = None;
        Ok(())
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand back the previously shown frame in its place.
    ///
    /// The caller keeps one `FrameBuffer` and passes it in every frame; after
    /// the call it holds stale contents sized like the new frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.bytes)?;
                shown
            }
            stale => {
                encode_full_into(fb, &mut self.bytes)?;
                let mut spare = stale.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.send()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn send(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        if y > 0 {
            pen.newline()?;
        }
        for x in 0..fb.width() {
            pen.cell(fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish()
}

/// Encode only the changed runs of `next` relative to `prev` into `out`.
///
/// Writes nothing at all when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    for run in ChangedRuns::new(prev, next) {
        pen.move_to(run.x, run.y)?;
        for x in run.x..run.x + run.len {
            pen.cell(next.get(x, run.y).unwrap_or_default())?;
        }
    }
    pen.finish()
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Tracks the terminal's current style so repeated cells cost one `Print`.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))
    }

    fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))
    }

    fn cell(&mut self, cell: Cell) -> io::Result<()> {
        self.restyle(cell.style)?;
        queue!(self.out, Print(cell.ch))
    }

    fn restyle(&mut self, want: CellStyle) -> io::Result<()> {
        let had = match self.style {
            Some(had) if had == want => return Ok(()),
            other => other,
        };

        // SGR reset also drops colors, so both get re-sent after one.
        let attrs_changed = had.map_or(true, |h| h.bold != want.bold || h.dim != want.dim);
        if attrs_changed {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            if want.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if want.dim {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || had.map(|h| h.fg) != Some(want.fg) {
            queue!(self.out, SetForegroundColor(truecolor(want.fg)))?;
        }
        if attrs_changed || had.map(|h| h.bg) != Some(want.bg) {
            queue!(self.out, SetBackgroundColor(truecolor(want.bg)))?;
        }

        self.style = Some(want);
        Ok(())
    }

    /// Leave the terminal unstyled, if anything was written.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Horizontal runs of cells that differ between two same-sized frames.
///
/// Frames of different sizes yield every row as one run.
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    resized: bool,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            resized: !same_size(prev, next),
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16) -> bool {
        self.prev.get(x, self.y) != self.next.get(x, self.y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let width = self.next.width();
        while self.y < self.next.height() {
            if self.resized {
                let run = Run { x: 0, y: self.y, len: width };
                self.y += 1;
                return Some(run);
            }

            while self.x < width && !self.differs(self.x) {
                self.x += 1;
            }
            if self.x < width {
                let start = self.x;
                while self.x < width && self.differs(self.x) {
                    self.x += 1;
                }
                return Some(Run { x: start, y: self.y, len: self.x - start });
            }

            self.x = 0;
            self.y += 1;
        }
        None
    }
}
