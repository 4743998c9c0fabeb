//! Application-wide constants.
//!
//! Centralizes tick rates, layout geometry, and thresholds shared by the
//! menu, dashboard, and games.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Dashboard refresh tick (ms). The input poll timeout doubles as the delay.
pub const DASHBOARD_TICK_MS: u64 = 500;
/// Snake game tick (ms). One poll, one step.
pub const SNAKE_TICK_MS: u64 = 100;
/// Settling delay between the first two CPU samples (ms).
pub const INITIAL_SETTLE_MS: u64 = 250;

// ── Snake ─────────────────────────────────────────────────────────
/// Minimum terminal rows for the snake game.
pub const SNAKE_MIN_ROWS: u16 = 20;
/// Minimum terminal columns for the snake game.
pub const SNAKE_MIN_COLS: u16 = 60;
/// Food never spawns closer than this to the terminal edge.
pub const FOOD_MARGIN: i32 = 5;
/// Starting body, head first, as (row, col).
pub const SNAKE_START_BODY: [(i32, i32); 3] = [(10, 10), (9, 10), (8, 10)];
pub const SNAKE_HEAD_GLYPH: char = 'O';
pub const SNAKE_BODY_GLYPH: char = 'o';
pub const FOOD_GLYPH: char = '@';

// ── Tic-tac-toe ───────────────────────────────────────────────────
pub const PLAYER_GLYPH: char = 'X';
pub const COMPUTER_GLYPH: char = 'O';
/// First terminal row of the board.
pub const BOARD_TOP: i32 = 4;
/// Row of the status line.
pub const BOARD_STATUS_ROW: i32 = 12;

// ── Gauges ────────────────────────────────────────────────────────
/// Width of a dashboard gauge bar in cells.
pub const GAUGE_WIDTH: u16 = 40;
/// Percentages at or above this use the middle band.
pub const GAUGE_MID_PCT: f32 = 50.0;
/// Percentages at or above this use the high band.
pub const GAUGE_HIGH_PCT: f32 = 80.0;
pub const GAUGE_FILLED_GLYPH: char = '█';
pub const GAUGE_EMPTY_GLYPH: char = '░';

// ── Dashboard layout ──────────────────────────────────────────────
/// Column of the right-hand (network/system) panels.
pub const DASHBOARD_RIGHT_COL: i32 = 50;
/// Placeholder for metrics the source could not provide.
pub const UNAVAILABLE: &str = "n/a";
pub const ONE_GIB: u64 = 1024 * 1024 * 1024;
pub const ONE_MIB: u64 = 1024 * 1024;

// ── Menu layout ───────────────────────────────────────────────────
/// Row of the first logo line.
pub const LOGO_TOP: i32 = 2;
/// Width of the bordered menu box.
pub const MENU_BOX_WIDTH: i32 = 40;

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/systembot/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("systembot")
}

/// Returns `~/.config/systembot/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/systembot/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}

/// Returns `~/.local/share/systembot/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("systembot")
}

/// Returns `~/.local/share/systembot/systembot.log`.
pub fn log_file_path() -> PathBuf {
    data_dir().join("systembot.log")
}
