//! # SystemBot - Terminal Dashboard and Mini-Games
//!
//! A menu-driven terminal app: a live host-metrics dashboard, a snake game
//! and tic-tac-toe against the computer.

mod app;
mod config;
pub mod constants;
mod error;
mod games;
mod models;
mod monitor;
mod screens;
mod surface;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use config::Config;

/// SystemBot - Terminal System Dashboard and Mini-Games
#[derive(Parser, Debug)]
#[command(name = "systembot", version, about = "A terminal system dashboard with snake and tic-tac-toe")]
struct Cli {
    /// Color theme (default, gruvbox, nord, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Mount point shown in the dashboard's disk panel
    #[arg(long, short = 'd', value_name = "PATH")]
    disk: Option<PathBuf>,

    /// Config file (default: ~/.config/systembot/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.local/share/systembot/systembot.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The UI owns the terminal, so logs go to a file
    let log_path = cli.log_file.clone().unwrap_or_else(constants::log_file_path);
    init_logging(&log_path);

    // Load and apply CLI overrides to config
    let config_path = cli.config.clone().unwrap_or_else(constants::config_file_path);
    let mut config = Config::load(&config_path);
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }
    if let Some(disk) = cli.disk {
        config.disk_mount = disk;
    }

    let mut app = app::App::new(&config);
    app.run()
}

/// Route `log` output to `path`, filtered by `RUST_LOG` (default `info`).
/// Failure to open the file only costs us the log.
fn init_logging(path: &Path) {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
}
