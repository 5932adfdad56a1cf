use crate::catalog::Rgb;
use crate::surface::{CanvasSize, ScreenPoint, Surface};
use anyhow::Context;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

// Braille: 2×4 dots per cell
const DOTS_X: u32 = 2;
const DOTS_Y: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: Color::White, bg: Color::Black }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
}

/// Braille sub-pixel canvas plus a text layer that wins over dots.
pub(crate) struct Frame {
    cols: u16,
    rows: u16,
    w: u32,
    h: u32,
    dots: Vec<Option<Rgb>>,
    text: Vec<Option<(char, Rgb)>>,
}

impl Frame {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let w = cols as u32 * DOTS_X;
        let h = rows as u32 * DOTS_Y;
        Self {
            cols,
            rows,
            w,
            h,
            dots: vec![None; (w as usize) * (h as usize)],
            text: vec![None; (cols as usize) * (rows as usize)],
        }
    }

    fn clear(&mut self) {
        self.dots.fill(None);
        self.text.fill(None);
    }

    fn plot(&mut self, x: i64, y: i64, c: Rgb) {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return;
        }
        let i = (y as usize) * (self.w as usize) + (x as usize);
        self.dots[i] = Some(c);
    }

    /// Filled axis-aligned ellipse; a disc when `rx == ry`.
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, c: Rgb) {
        if !(cx.is_finite() && cy.is_finite() && rx.is_finite() && ry.is_finite()) {
            return;
        }
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let x0 = (cx - rx).floor().max(0.0) as i64;
        let x1 = (cx + rx).ceil().min(self.w as f64 - 1.0) as i64;
        let y0 = (cy - ry).floor().max(0.0) as i64;
        let y1 = (cy + ry).ceil().min(self.h as f64 - 1.0) as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f64 + 0.5 - cx) / rx;
                let ny = (y as f64 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(x, y, c);
                }
            }
        }
        self.plot(cx.floor() as i64, cy.floor() as i64, c);
    }

    fn line(&mut self, a: ScreenPoint, b: ScreenPoint, c: Rgb) {
        let Some((a, b)) = clip_segment(a, b, self.w as f64, self.h as f64) else {
            return;
        };
        let (mut x0, mut y0) = (a.x.floor() as i64, a.y.floor() as i64);
        let (x1, y1) = (b.x.floor() as i64, b.y.floor() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x0, y0, c);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn text(&mut self, at: ScreenPoint, s: &str, c: Rgb) {
        if !at.is_finite() {
            return;
        }
        let row = (at.y / DOTS_Y as f64).floor();
        if row < 0.0 || row >= self.rows as f64 {
            return;
        }
        let row = row as usize;
        let mut col = (at.x / DOTS_X as f64).floor() as i64;
        for ch in s.chars() {
            if col >= self.cols as i64 {
                break;
            }
            if col >= 0 {
                self.text[row * self.cols as usize + col as usize] = Some((ch, c));
            }
            col += 1;
        }
    }

    /// Resolve dots and text into terminal cells.
    pub(crate) fn compose(&self, out: &mut CellBuffer, bg: Color) {
        for cy in 0..self.rows as u32 {
            for cx in 0..self.cols as u32 {
                if let Some((ch, c)) = self.text[(cy as usize) * (self.cols as usize) + cx as usize] {
                    out.set(cx as u16, cy as u16, Cell { ch, fg: to_color(c), bg });
                    continue;
                }

                let mut mask: u8 = 0;
                let mut sum_r: u32 = 0;
                let mut sum_g: u32 = 0;
                let mut sum_b: u32 = 0;
                let mut ink_count: u32 = 0;

                for dy in 0..DOTS_Y {
                    for dx in 0..DOTS_X {
                        let x = cx * DOTS_X + dx;
                        let y = cy * DOTS_Y + dy;
                        if let Some(p) = self.dots[(y as usize) * (self.w as usize) + x as usize] {
                            mask |= braille_bit(dx, dy);
                            sum_r += p.r as u32;
                            sum_g += p.g as u32;
                            sum_b += p.b as u32;
                            ink_count += 1;
                        }
                    }
                }

                let cell = if ink_count == 0 {
                    Cell { ch: ' ', fg: Color::White, bg }
                } else {
                    Cell {
                        ch: char::from_u32(0x2800 + mask as u32).unwrap_or(' '),
                        fg: Color::Rgb {
                            r: (sum_r / ink_count) as u8,
                            g: (sum_g / ink_count) as u8,
                            b: (sum_b / ink_count) as u8,
                        },
                        bg,
                    }
                };
                out.set(cx as u16, cy as u16, cell);
            }
        }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn braille_bit(dx: u32, dy: u32) -> u8 {
    // Dot mapping:
    // (0,0)=1 (0,1)=2 (0,2)=4 (0,3)=64
    // (1,0)=8 (1,1)=16 (1,2)=32 (1,3)=128
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

/// Liang–Barsky clip of segment `a`-`b` to `[0, w) × [0, h)`.
fn clip_segment(a: ScreenPoint, b: ScreenPoint, w: f64, h: f64) -> Option<(ScreenPoint, ScreenPoint)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let (xmax, ymax) = (w - 1e-6, h - 1e-6);
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [(-dx, a.x), (dx, xmax - a.x), (-dy, a.y), (dy, ymax - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a.offset(t0 * dx, t0 * dy), a.offset(t1 * dx, t1 * dy)))
}

/// Full-screen crossterm surface.
pub(crate) struct TerminalSurface {
    out: io::Stdout,
    frame: Frame,
    prev: CellBuffer,
    cur: CellBuffer,
}

impl TerminalSurface {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            Clear(ClearType::All)
        )
        .context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;

        let (cols, rows) = terminal::size().context("reading terminal size")?;
        tracing::info!(cols, rows, "terminal ready");
        Ok(Self {
            out,
            frame: Frame::new(cols, rows),
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )
        .context("leaving alternate screen")?;
        self.out.flush().context("flushing terminal")?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        Ok(())
    }

    fn resize_if_needed(&mut self) {
        let Ok((c, r)) = terminal::size() else {
            return;
        };
        if c == self.frame.cols && r == self.frame.rows {
            return;
        }
        tracing::debug!(cols = c, rows = r, "terminal resized");
        self.frame = Frame::new(c, r);
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        // force a full repaint on the next present
        for cell in &mut self.prev.cells {
            cell.ch = '\0';
        }
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> CanvasSize {
        CanvasSize { width: self.frame.w as f64, height: self.frame.h as f64 }
    }

    fn line_height(&self) -> f64 {
        DOTS_Y as f64
    }

    fn clear(&mut self) {
        self.resize_if_needed();
        self.frame.clear();
    }

    fn draw_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb) {
        self.frame.fill_ellipse(center.x, center.y, radius, radius, color);
    }

    fn draw_ellipse(&mut self, center: ScreenPoint, rx: f64, ry: f64, color: Rgb) {
        self.frame.fill_ellipse(center.x, center.y, rx, ry, color);
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], color: Rgb) {
        for pair in points.windows(2) {
            self.frame.line(pair[0], pair[1], color);
        }
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb) {
        self.frame.text(at, text, color);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.frame.compose(&mut self.cur, Color::Black);
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.cur.h {
            for x in 0..self.cur.w {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}
