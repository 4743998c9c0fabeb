//! Application struct and root loop.
//!
//! Owns the menu, the metrics source and the random source. The menu loop
//! hands the surface to one screen at a time and takes it back when that
//! screen returns.

use anyhow::Result;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::Config;
use crate::error::SurfaceError;
use crate::games::{snake, tictactoe};
use crate::monitor::{MetricsSource, SystemCollector};
use crate::screens::dashboard;
use crate::screens::menu::{self, Destination, Menu, MenuAction};
use crate::surface::{Key, Surface, TerminalSurface};
use crate::ui::Theme;

/// Main application struct.
pub struct App<M, R> {
    theme: Theme,
    menu: Menu<Destination>,
    metrics: M,
    rng: R,
}

impl App<SystemCollector, ThreadRng> {
    /// Build the app for a real host: sysinfo metrics and the thread RNG.
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            Theme::resolve(&config.theme),
            SystemCollector::new(config.disk_mount.clone()),
            rand::thread_rng(),
        )
    }
}

impl<M: MetricsSource, R: Rng> App<M, R> {
    pub fn with_parts(theme: Theme, metrics: M, rng: R) -> Self {
        Self {
            theme,
            menu: Menu::default(),
            metrics,
            rng,
        }
    }

    /// Acquire the terminal, run the menu until the user quits, restore it.
    pub fn run(&mut self) -> Result<()> {
        let mut surface = TerminalSurface::acquire()?;
        log::info!("systembot started (theme '{}')", self.theme.name);

        let result = self.main_loop(&mut surface);
        // Restore before reporting, so the error lands on a sane terminal.
        let released = surface.release();
        report(result, released)?;

        log::info!("systembot stopped");
        Ok(())
    }

    /// The menu loop. Returns when the user quits or activates Exit.
    pub fn main_loop<S: Surface>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_cursor_visible(false)?;
        loop {
            menu::render(surface, &self.menu, &self.theme)?;

            let Some(key) = surface.poll_key(None)? else {
                continue;
            };
            if key.is_quit() {
                return Ok(());
            }
            match key {
                Key::Up => self.menu.move_up(),
                Key::Down => self.menu.move_down(),
                Key::Enter => match self.menu.activate() {
                    MenuAction::Quit => return Ok(()),
                    MenuAction::Open(destination) => self.open(surface, destination)?,
                },
                other => {
                    // 1..=N select entry n-1; anything else is ignored
                    if let Some(n) = other.digit().filter(|&n| n >= 1) {
                        self.menu.jump_to(n - 1);
                    }
                }
            }
        }
    }

    /// Give the surface to one destination until it returns.
    fn open<S: Surface>(&mut self, surface: &mut S, destination: Destination) -> Result<(), SurfaceError> {
        log::info!("opening {}", destination.label());
        surface.clear();
        surface.refresh()?;

        match destination {
            Destination::Snake => snake::run(surface, &self.theme, &mut self.rng)?,
            Destination::TicTacToe => tictactoe::run(surface, &self.theme, &mut self.rng)?,
            Destination::Dashboard => dashboard::run(surface, &mut self.metrics, &self.theme)?,
            Destination::Exit => {}
        }

        surface.clear();
        surface.refresh()
    }
}

/// Fold the loop result and the terminal restore into one result. A loop
/// failure is reported ahead of a restore failure.
fn report(result: Result<(), SurfaceError>, released: Result<(), SurfaceError>) -> Result<()> {
    if let Err(e) = &released {
        if result.is_err() {
            log::error!("terminal restore failed: {}", e);
        }
    }
    result?;
    released?;
    Ok(())
}
