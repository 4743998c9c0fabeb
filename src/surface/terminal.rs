//! The real terminal: crossterm for raw mode and input, ratatui for diffed output.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    Terminal,
};

use super::{write_clipped, Key, Surface};
use crate::error::SurfaceError;

/// Owns the terminal for the whole program run.
///
/// Acquiring enters raw mode and the alternate screen; dropping (or
/// [`TerminalSurface::release`]) restores the terminal.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    back: Buffer,
    cursor_visible: bool,
    restored: bool,
}

impl TerminalSurface {
    pub fn acquire() -> Result<Self, SurfaceError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let (cols, rows) = crossterm::terminal::size()?;
        log::debug!("terminal acquired at {}x{}", rows, cols);

        Ok(Self {
            terminal,
            back: Buffer::empty(Rect::new(0, 0, cols, rows)),
            cursor_visible: false,
            restored: false,
        })
    }

    /// Restore the terminal, reporting any failure.
    pub fn release(mut self) -> Result<(), SurfaceError> {
        self.restore()
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        let area = match crossterm::terminal::size() {
            Ok((cols, rows)) => Rect::new(0, 0, cols, rows),
            Err(_) => self.back.area,
        };
        self.back = Buffer::empty(area);
    }

    fn draw(&mut self, row: i32, col: i32, text: &str, style: Style) {
        write_clipped(&mut self.back, row, col, text, style);
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.cursor_visible = visible;
        if visible {
            self.terminal.show_cursor()?;
        } else {
            self.terminal.hide_cursor()?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), SurfaceError> {
        let back = &self.back;
        self.terminal
            .draw(|frame| frame.render_widget(BackBuffer(back), frame.area()))?;
        // ratatui hides the cursor after every frame that doesn't place it
        if self.cursor_visible {
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    fn poll_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>, SurfaceError> {
        let Some(timeout) = timeout else {
            loop {
                if let Event::Key(ev) = event::read()? {
                    if let Some(key) = Key::from_event(ev) {
                        return Ok(Some(key));
                    }
                }
            }
        };

        // Non-key events (resize, focus) don't cut the tick short.
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }
            if let Event::Key(ev) = event::read()? {
                if let Some(key) = Key::from_event(ev) {
                    return Ok(Some(key));
                }
            }
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.back.area.height, self.back.area.width)
    }
}

/// Copies the back buffer into the frame, cell by cell.
struct BackBuffer<'a>(&'a Buffer);

impl Widget for BackBuffer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.0.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}
