//! Terminal output and input translation (crossterm)
//!
//! Each terminal cell shows two canvas pixels using an upper half block:
//! foreground is the top pixel, background the bottom one. Only cells that
//! changed since the last frame are rewritten.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate},
};

use super::{Canvas, Color, Label};
use crate::input::{InputEvent, Key};

const HALF_BLOCK: char = '▀';

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Presents canvases to a terminal
pub struct TerminalPresenter<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// (top, bottom) colours last written to each cell, `None` = must redraw
    last: Vec<Option<(Color, Color)>>,
    last_labels: Vec<Label>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            last: vec![None; cols as usize * rows as usize],
            last_labels: Vec::new(),
        }
    }

    /// Canvas pixel size matching this terminal
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.cols as u32, self.rows as u32 * 2)
    }

    /// Adopt a new terminal size; everything is redrawn on the next present
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.last = vec![None; cols as usize * rows as usize];
        self.last_labels.clear();
    }

    /// Cell indices a label covers
    fn label_cells(&self, label: &Label) -> Vec<usize> {
        let row = (label.y / 2) as usize;
        if row >= self.rows as usize {
            return Vec::new();
        }
        let cols = self.cols as usize;
        let start = label.x as usize;
        let end = (start + label.text.chars().count()).min(cols);
        (start..end).map(|c| row * cols + c).collect()
    }

    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        // Cells under old labels must be repainted
        let stale: Vec<usize> = self
            .last_labels
            .iter()
            .flat_map(|l| self.label_cells(l))
            .collect();
        for idx in stale {
            if let Some(cell) = self.last.get_mut(idx) {
                *cell = None;
            }
        }

        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut pen: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            let mut cursor_at: Option<u16> = None;
            for col in 0..self.cols {
                let top = canvas.pixel(col as u32, row as u32 * 2).unwrap_or_default();
                let bottom = canvas.pixel(col as u32, row as u32 * 2 + 1).unwrap_or_default();
                let idx = row as usize * self.cols as usize + col as usize;
                if self.last[idx] == Some((top, bottom)) {
                    cursor_at = None;
                    continue;
                }
                self.last[idx] = Some((top, bottom));

                if cursor_at != Some(col) {
                    queue!(self.out, cursor::MoveTo(col, row))?;
                }
                if pen != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(top)),
                        SetBackgroundColor(term_color(bottom))
                    )?;
                    pen = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
                cursor_at = Some(col + 1);
            }
        }

        for label in canvas.labels() {
            let row = (label.y / 2) as u16;
            if row >= self.rows || label.x >= self.cols as u32 {
                continue;
            }
            let room = self.cols as usize - label.x as usize;
            let text: String = label.text.chars().take(room).collect();
            let bg = canvas.pixel(label.x, label.y + 1).unwrap_or_default();
            queue!(
                self.out,
                cursor::MoveTo(label.x as u16, row),
                SetForegroundColor(term_color(label.color)),
                SetBackgroundColor(term_color(bg)),
                Print(text)
            )?;
            pen = None;
            for idx in self.label_cells(label) {
                self.last[idx] = None;
            }
        }
        self.last_labels = canvas.labels().to_vec();

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Map a terminal event to a game input event
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };

    if modifiers.contains(KeyModifiers::CONTROL) && *code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    let key = match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            return (*kind != KeyEventKind::Release).then_some(InputEvent::Quit);
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Char(c @ '1'..='5') => Key::Digit(*c as u8 - b'0'),
        _ => return None,
    };

    Some(match kind {
        KeyEventKind::Release => InputEvent::KeyUp(key),
        KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyDown(key),
    })
}
