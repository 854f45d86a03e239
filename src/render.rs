use crate::color::FOG;
use crate::label::PointerAffordanceSink;
use crate::panel::{ControlPanel, Param};
use anyhow::Context;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Cell {
    pub(crate) fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg,
            bold: false,
        }
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
            cells: vec![Cell::blank(Color::Black); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn get(&self, x: u16, y: u16) -> Option<Cell> {
        (x < self.w && y < self.h).then(|| self.cells[self.idx(x, y)])
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell::blank(bg));
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x as usize + i;
        if xx >= buf.w as usize {
            break;
        }
        buf.set(
            xx as u16,
            y,
            Cell {
                ch,
                fg,
                bg,
                bold: false,
            },
        );
    }
}

fn fit(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Screen state: alternate screen, raw mode, mouse reporting, and the
/// previous frame for diffing.
pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        enter_screen(&mut out, terminal::enable_raw_mode, terminal::disable_raw_mode)?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
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
            EndSynchronizedUpdate,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        log::debug!("resize {}x{} -> {}x{}", self.cols, self.rows, c, r);
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_bold = false;
        queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_bold != c.bold {
                    let attr = if c.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attr))?;
                    last_bold = c.bold;
                }
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

/// Raw mode goes first so a failed screen switch leaves nothing enabled.
fn enter_screen<W: Write>(
    out: &mut W,
    enable_raw: impl FnOnce() -> io::Result<()>,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> anyhow::Result<()> {
    enable_raw().context("enabling raw mode")?;
    let entered = execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        DisableLineWrap,
        EnableMouseCapture,
        terminal::Clear(ClearType::All)
    );
    if let Err(e) = entered {
        disable_raw().ok();
        // partial escape sequences may have landed; undo what we can
        execute!(out, DisableMouseCapture, EnableLineWrap, cursor::Show, LeaveAlternateScreen).ok();
        return Err(e).context("entering alternate screen");
    }
    Ok(())
}

/// Pointer shape through the OSC 22 sequence understood by xterm, kitty,
/// foot and friends. Only writes when the shape actually changes.
pub(crate) struct TerminalPointer {
    shown: bool,
}

impl TerminalPointer {
    pub(crate) fn new() -> Self {
        Self { shown: false }
    }

    fn apply(&mut self, hovered: bool) {
        if self.shown == hovered {
            return;
        }
        self.shown = hovered;
        let shape = if hovered { "pointer" } else { "default" };
        let mut out = io::stdout();
        // a lost cursor shape is not worth failing a frame over
        if queue!(out, Print(format!("\x1b]22;{shape}\x1b\\"))).is_ok() {
            out.flush().ok();
        }
    }
}

impl PointerAffordanceSink for TerminalPointer {
    fn set_hover(&mut self, hovered: bool) {
        self.apply(hovered);
    }
    fn clear(&mut self) {
        self.apply(false);
    }
}

/* -----------------------------
   Overlays: status line and control panel
------------------------------ */

pub(crate) const PANEL_W: u16 = 28;
const PANEL_H: u16 = Param::ALL.len() as u16 + 5;
const PANEL_TOP: u16 = 1;

/// Rows left to the scene between the status line and the key hints.
pub(crate) fn label_rows(h: u16) -> Range<u16> {
    if h < 2 {
        0..h
    } else {
        1..h - 1
    }
}

pub(crate) struct Status<'a> {
    pub(crate) paused: bool,
    pub(crate) labels: usize,
    pub(crate) generation: u64,
    pub(crate) hovered: Option<&'a str>,
    pub(crate) face: &'a str,
    pub(crate) time: f32,
}

pub(crate) fn draw_status(buf: &mut CellBuffer, st: &Status<'_>) {
    if buf.h < 2 {
        return;
    }
    let bg = Color::Rgb { r: 20, g: 20, b: 24 };
    let fg = Color::Rgb { r: 210, g: 210, b: 215 };
    let dim = Color::Rgb { r: 140, g: 140, b: 150 };
    let max = buf.w as usize;

    let line1 = format!(
        " wordsphere | {} | t {:.1}s | {} words (gen {}) | face {} | {}",
        if st.paused { "paused" } else { "live" },
        st.time,
        st.labels,
        st.generation,
        st.face,
        st.hovered.unwrap_or("-"),
    );
    let line2 = " Q quit  Space pause  R reshuffle  Tab panel  WASD/drag orbit  +/- wheel zoom";

    for x in 0..buf.w {
        buf.set(x, buf.h - 1, Cell::blank(bg));
    }
    draw_text(buf, 0, 0, &fit(&line1, max), fg, FOG.to_color());
    draw_text(buf, 0, buf.h - 1, &fit(line2, max), dim, bg);
}

/// Columns the panel takes from the right edge; zero when hidden or the terminal is too small.
pub(crate) fn panel_width(panel: &ControlPanel, w: u16, h: u16) -> u16 {
    if panel.visible && w >= PANEL_W + 10 && h >= PANEL_TOP + PANEL_H + 1 {
        PANEL_W
    } else {
        0
    }
}

pub(crate) fn draw_panel(buf: &mut CellBuffer, panel: &ControlPanel) {
    if panel_width(panel, buf.w, buf.h) == 0 {
        return;
    }
    let x0 = buf.w - PANEL_W;
    let y0 = PANEL_TOP;
    let bh = PANEL_H;
    let bg = Color::Rgb { r: 7, g: 8, b: 12 };
    let fg = Color::Rgb { r: 210, g: 220, b: 235 };
    let dim = Color::Rgb { r: 140, g: 150, b: 165 };
    let edge = Color::Rgb { r: 90, g: 100, b: 120 };
    let accent = Color::Rgb { r: 250, g: 39, b: 32 };

    for y in y0..y0 + bh {
        for x in x0..buf.w {
            buf.set(x, y, Cell::blank(bg));
        }
    }
    box_draw(buf, x0, y0, PANEL_W, bh, edge, bg);
    draw_text(buf, x0 + 2, y0 + 1, "CONTROLS", dim, bg);

    for (i, p) in Param::ALL.iter().enumerate() {
        let y = y0 + 3 + i as u16;
        let selected = *p == panel.selected();
        let (mark, color) = if selected { ('>', accent) } else { (' ', fg) };
        let value = panel.value_text(*p);
        let name_w = (PANEL_W as usize).saturating_sub(value.len() + 6);
        let line = format!("{mark} {:<name_w$} {value}", p.name());
        draw_text(buf, x0 + 1, y, &fit(&line, PANEL_W as usize - 2), color, bg);
    }
    draw_text(buf, x0 + 2, y0 + bh - 2, "up/dn sel  lt/rt adj", dim, bg);
}

fn box_draw(buf: &mut CellBuffer, x0: u16, y0: u16, bw: u16, bh: u16, fg: Color, bg: Color) {
    let x1 = x0.saturating_add(bw.saturating_sub(1));
    let y1 = y0.saturating_add(bh.saturating_sub(1));
    let mut put = |x: u16, y: u16, ch: char| {
        buf.set(
            x,
            y,
            Cell {
                ch,
                fg,
                bg,
                bold: false,
            },
        )
    };

    for x in x0 + 1..x1 {
        put(x, y0, '─');
        put(x, y1, '─');
    }
    for y in y0 + 1..y1 {
        put(x0, y, '│');
        put(x1, y, '│');
    }
    put(x0, y0, '┌');
    put(x1, y0, '┐');
    put(x0, y1, '└');
    put(x1, y1, '┘');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CloudConfig;

    fn row_text(buf: &CellBuffer, y: u16) -> String {
        (0..buf.w).filter_map(|x| buf.get(x, y)).map(|c| c.ch).collect()
    }

    #[test]
    fn text_is_clipped_at_edge() {
        let mut buf = CellBuffer::new(5, 1);
        draw_text(&mut buf, 2, 0, "Enigma", Color::White, Color::Black);
        assert_eq!(row_text(&buf, 0), "  Eni");
        draw_text(&mut buf, 0, 4, "off", Color::White, Color::Black);
    }

    #[test]
    fn panel_lists_every_param_and_marks_selection() {
        let mut buf = CellBuffer::new(80, 24);
        let mut panel = ControlPanel::new(CloudConfig::default());
        panel.select(6);
        draw_panel(&mut buf, &panel);
        let text: Vec<String> = (0..buf.h).map(|y| row_text(&buf, y)).collect();
        for p in Param::ALL {
            assert!(text.iter().any(|l| l.contains(p.name())), "{} missing", p.name());
        }
        assert!(text.iter().any(|l| l.contains("> frequency") && l.contains("1.20")));
    }

    #[test]
    fn hidden_panel_draws_nothing() {
        let mut buf = CellBuffer::new(80, 24);
        let mut panel = ControlPanel::new(CloudConfig::default());
        panel.visible = false;
        draw_panel(&mut buf, &panel);
        assert!(buf.cells.iter().all(|c| c.ch == ' '));
        assert_eq!(panel_width(&panel, 80, 24), 0);
        panel.visible = true;
        assert_eq!(panel_width(&panel, 80, 24), PANEL_W);
        assert_eq!(panel_width(&panel, 30, 24), 0);
    }

    #[test]
    fn panel_needs_room_below_for_the_hint_line() {
        let panel = ControlPanel::new(CloudConfig::default());
        assert_eq!(panel_width(&panel, 80, 13), 0);
        assert_eq!(panel_width(&panel, 80, 14), PANEL_W);

        let mut buf = CellBuffer::new(80, 14);
        draw_panel(&mut buf, &panel);
        draw_status(
            &mut buf,
            &Status {
                paused: false,
                labels: 4,
                generation: 1,
                hovered: None,
                face: "plain",
                time: 0.0,
            },
        );
        assert!(row_text(&buf, 13).contains("Q quit"));
        assert!(row_text(&buf, 11).contains("up/dn sel"));
        assert_eq!(buf.get(buf.w - PANEL_W, 12).map(|c| c.ch), Some('└'));
        assert_eq!(buf.get(buf.w - 1, 12).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn label_rows_skip_the_hud() {
        assert_eq!(label_rows(24), 1..23);
        assert_eq!(label_rows(1), 0..1);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_screen_switch_leaves_raw_mode_off() {
        let calls = std::cell::RefCell::new(Vec::new());
        let res = enter_screen(
            &mut Broken,
            || {
                calls.borrow_mut().push("raw on");
                Ok(())
            },
            || {
                calls.borrow_mut().push("raw off");
                Ok(())
            },
        );
        assert!(res.is_err());
        assert_eq!(*calls.borrow(), vec!["raw on", "raw off"]);
    }

    #[test]
    fn screen_switch_keeps_raw_mode_on_success() {
        let calls = std::cell::RefCell::new(Vec::new());
        let mut out = Vec::new();
        enter_screen(
            &mut out,
            || {
                calls.borrow_mut().push("raw on");
                Ok(())
            },
            || {
                calls.borrow_mut().push("raw off");
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(*calls.borrow(), vec!["raw on"]);
        assert!(!out.is_empty());
    }

    #[test]
    fn status_shows_hovered_word() {
        let mut buf = CellBuffer::new(120, 10);
        draw_status(
            &mut buf,
            &Status {
                paused: true,
                labels: 144,
                generation: 2,
                hovered: Some("Penumbra"),
                face: "plain",
                time: 3.0,
            },
        );
        let top = row_text(&buf, 0);
        assert!(top.contains("paused"));
        assert!(top.contains("144 words"));
        assert!(top.contains("Penumbra"));
        assert!(row_text(&buf, 9).contains("Q quit"));
    }
}
