//! In-memory surface for driving screen loops in tests.

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::{write_clipped, Key, Surface};
use crate::error::SurfaceError;

/// A fixed-size grid fed by a scripted queue of poll results.
///
/// Each poll pops one entry: `Some(key)` is a key press, `None` a timeout.
/// Once the script runs out every poll answers `q`, so loops always end.
pub struct MemorySurface {
    back: Buffer,
    presented: Buffer,
    script: VecDeque<Option<Key>>,
    pub refreshes: usize,
    pub polls: Vec<Option<Duration>>,
    pub cursor_visible: bool,
}

impl MemorySurface {
    pub fn new(rows: u16, cols: u16) -> Self {
        let area = Rect::new(0, 0, cols, rows);
        Self {
            back: Buffer::empty(area),
            presented: Buffer::empty(area),
            script: VecDeque::new(),
            refreshes: 0,
            polls: Vec::new(),
            cursor_visible: true,
        }
    }

    pub fn with_script(mut self, script: impl IntoIterator<Item = Option<Key>>) -> Self {
        self.script.extend(script);
        self
    }

    pub fn keys(self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.with_script(keys.into_iter().map(Some))
    }

    /// Script entries not consumed yet.
    pub fn pending(&self) -> usize {
        self.script.len()
    }

    /// Text of one row of the last presented frame.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.presented.area.width)
            .filter_map(|x| self.presented.cell((x, row)).map(|c| c.symbol().to_string()))
            .collect()
    }

    /// Whether any row of the last presented frame contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.presented.area.height).any(|y| self.row_text(y).contains(needle))
    }

    /// Glyph and style at one cell of the last presented frame.
    pub fn cell(&self, row: u16, col: u16) -> Option<(String, Style)> {
        self.presented
            .cell((col, row))
            .map(|c| (c.symbol().to_string(), c.style()))
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self) {
        self.back = Buffer::empty(self.back.area);
    }

    fn draw(&mut self, row: i32, col: i32, text: &str, style: Style) {
        write_clipped(&mut self.back, row, col, text, style);
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), SurfaceError> {
        self.presented = self.back.clone();
        self.refreshes += 1;
        Ok(())
    }

    fn poll_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>, SurfaceError> {
        self.polls.push(timeout);
        loop {
            let next = self.script.pop_front().unwrap_or(Some(Key::Char('q')));
            // A blocking poll never times out; skip scripted timeouts.
            if timeout.is_none() && next.is_none() {
                continue;
            }
            return Ok(next);
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.back.area.height, self.back.area.width)
    }
}
