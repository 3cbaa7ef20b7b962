//! Screen: owns the terminal session and flushes framebuffers to it.
//!
//! Frames are diffed against the last one written; only changed runs of
//! cells are re-encoded. Generic over the writer so encoding can be checked
//! against an in-memory buffer.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct Screen<W: Write = io::Stdout> {
    out: W,
    prev: FrameBuffer,
    /// Full redraw pending (first frame, resize, explicit invalidate).
    stale: bool,
    buf: Vec<u8>,
}

impl Screen<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prev: FrameBuffer::new(0, 0),
            stale: true,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()?;
        self.stale = true;
        Ok(())
    }

    /// Undo everything [`Screen::enter`] did. Safe to call after a failed enter.
    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Write `frame`, redrawing only what changed since the last present.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let resized = self.prev.width() != frame.width() || self.prev.height() != frame.height();
        if self.stale || resized {
            write_full(frame, &mut self.buf)?;
            self.stale = false;
        } else {
            write_changes(&self.prev, frame, &mut self.buf)?;
        }
        self.flush()?;
        self.prev.clone_from(frame);
        Ok(())
    }

    /// The writer, mostly for inspecting output in tests.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a whole frame, row by row.
pub fn write_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..frame.width() {
            pen.print(out, frame.get(x, y).unwrap_or_default())?;
        }
    }
    reset(out)
}

/// Encode only runs of cells that differ between `prev` and `next`.
///
/// Both frames must have the same size.
pub fn write_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            pen.print(out, next.get(x + dx, y).unwrap_or_default())?;
        }
    }
    reset(out)
}

/// (x, y, len) of every horizontal run of differing cells.
pub fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

/// Tracks the last style emitted so runs of equal style are written once.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let s = cell.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(color(s.fg)))?;
            out.queue(SetBackgroundColor(color(s.bg)))?;
            if s.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if s.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(s);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn reset(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(fb: &mut FrameBuffer, x: u16, ch: char) {
        fb.put_char(x, 0, ch, CellStyle::default());
    }

    #[test]
    fn test_changed_runs_coalesce() {
        let a = FrameBuffer::new(8, 2);
        let mut b = a.clone();
        put(&mut b, 1, 'X');
        put(&mut b, 2, 'X');
        put(&mut b, 3, 'X');
        put(&mut b, 6, 'Y');
        b.put_char(0, 1, 'Z', CellStyle::default());

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (6, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn test_identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 4);
        assert_eq!(changed_runs(&a, &a.clone()).count(), 0);
    }

    #[test]
    fn test_present_writes_full_then_diff() {
        let mut screen = Screen::new(Vec::new());
        let mut frame = FrameBuffer::new(4, 1);
        put(&mut frame, 0, 'A');
        screen.present(&frame).unwrap();
        let first = screen.writer().len();
        assert!(first > 0);

        // unchanged frame: only the trailing style reset goes out
        screen.present(&frame).unwrap();
        let second = screen.writer().len() - first;
        assert!(second < first);

        put(&mut frame, 3, 'B');
        screen.present(&frame).unwrap();
        let text = String::from_utf8_lossy(screen.writer());
        assert!(text.contains('A'));
        assert!(text.contains('B'));
    }
}
