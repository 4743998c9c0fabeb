//! Terminal surface abstraction.
//!
//! Every screen draws through a [`Surface`] handed to it by the caller; there is
//! no global terminal handle. The real implementation wraps crossterm + ratatui,
//! tests use an in-memory surface with a scripted key queue.

mod terminal;

#[cfg(test)]
pub mod memory;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthChar;

use crate::error::SurfaceError;

pub use terminal::TerminalSurface;

/// A key press, reduced to what the screens care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Char(char),
    /// Ctrl+C. Raw mode swallows the signal, so it arrives as a key.
    Interrupt,
    Other,
}

impl Key {
    /// Translate a crossterm key event. Releases and repeats are dropped.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(Key::Interrupt);
        }

        let key = match event.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        };
        Some(key)
    }

    /// The quit key: `q`/`Q` (and Ctrl+C).
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Char('Q') | Key::Interrupt)
    }

    /// Numeric value of a digit key.
    pub fn digit(&self) -> Option<usize> {
        match self {
            Key::Char(c) => c.to_digit(10).map(|d| d as usize),
            _ => None,
        }
    }
}

/// A fixed-size character grid with non-blocking keyboard input.
///
/// Coordinates are `(row, col)` from the top-left corner. They are signed so
/// callers can compute centered positions that fall off-screen; anything
/// outside the grid is silently dropped.
pub trait Surface {
    /// Blank the back buffer and pick up the current terminal size.
    fn clear(&mut self);

    /// Draw `text` starting at `(row, col)`. Glyphs outside the grid are skipped.
    fn draw(&mut self, row: i32, col: i32, text: &str, style: Style);

    fn draw_char(&mut self, row: i32, col: i32, glyph: char, style: Style) {
        let mut utf8 = [0u8; 4];
        self.draw(row, col, glyph.encode_utf8(&mut utf8), style);
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;

    /// Present the back buffer.
    fn refresh(&mut self) -> Result<(), SurfaceError>;

    /// Wait up to `timeout` for a key press; `None` blocks until one arrives.
    fn poll_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>, SurfaceError>;

    /// `(rows, cols)` as of the last [`Surface::clear`].
    fn size(&self) -> (u16, u16);
}

/// Write `text` into `buf` glyph by glyph, skipping whatever falls outside.
pub(crate) fn write_clipped(buf: &mut Buffer, row: i32, col: i32, text: &str, style: Style) {
    let area = buf.area;
    if row < 0 || row >= area.height as i32 {
        return;
    }

    let mut x = col;
    let mut utf8 = [0u8; 4];
    for glyph in text.chars() {
        let width = glyph.width().unwrap_or(0) as i32;
        if width == 0 {
            continue;
        }
        if x >= 0 && x + width <= area.width as i32 {
            buf.set_string(
                area.x + x as u16,
                area.y + row as u16,
                glyph.encode_utf8(&mut utf8),
                style,
            );
        }
        x += width;
    }
}
