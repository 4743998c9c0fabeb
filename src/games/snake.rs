//! Self-moving snake: one step per input poll, walls and self-overlap are fatal.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use rand::{seq::SliceRandom, Rng};
use ratatui::style::Style;

use crate::constants::*;
use crate::error::SurfaceError;
use crate::surface::{Key, Surface};
use crate::ui::helpers::{draw_box, draw_centered};
use crate::ui::Theme;

const TOO_SMALL_MESSAGE: &str = "Terminal too small. Please resize to at least 20x60.";

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the (row, col) delta for one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Arrow keys and WASD.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up | Key::Char('w') | Key::Char('W') => Some(Direction::Up),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(Direction::Down),
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Direction::Left),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A terminal grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }
}

/// The screen rectangle the snake lives in; its outermost ring is the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playfield {
    pub rows: i32,
    pub cols: i32,
}

impl Playfield {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether `cell` lies on or beyond the border.
    pub fn is_wall(&self, cell: Cell) -> bool {
        cell.row <= 0 || cell.row >= self.rows - 1 || cell.col <= 0 || cell.col >= self.cols - 1
    }

    /// Cells food may spawn on: the field inset by [`FOOD_MARGIN`].
    fn food_cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (FOOD_MARGIN..=self.rows - FOOD_MARGIN).flat_map(move |row| {
            (FOOD_MARGIN..=cols - FOOD_MARGIN).map(move |col| Cell::new(row, col))
        })
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// Food had nowhere left to spawn.
    BoardFull,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Over(EndReason),
}

/// Complete game state.
///
/// The body is head-first and never overlaps itself while the game runs; the
/// food is never on the body.
#[derive(Debug, Clone)]
pub struct SnakeState {
    field: Playfield,
    body: VecDeque<Cell>,
    direction: Direction,
    food: Option<Cell>,
    score: u32,
    ended: Option<EndReason>,
}

impl SnakeState {
    /// A fresh game: the standard three-segment start heading right.
    pub fn new(field: Playfield, rng: &mut impl Rng) -> Self {
        let body: VecDeque<Cell> = SNAKE_START_BODY
            .iter()
            .map(|&(row, col)| Cell::new(row, col))
            .collect();
        let food = place_food(&field, &body, rng);
        Self::with_parts(field, body, Direction::Right, food)
    }

    pub fn with_parts(
        field: Playfield,
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        food: Option<Cell>,
    ) -> Self {
        Self {
            field,
            body: body.into_iter().collect(),
            direction,
            food,
            score: 0,
            ended: None,
        }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn is_alive(&self) -> bool {
        self.ended.is_none()
    }

    pub fn field(&self) -> Playfield {
        self.field
    }

    /// Adopt `direction` unless it would reverse the snake onto itself.
    pub fn steer(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Advance one step. A finished game stays finished.
    pub fn tick(&mut self, input: Option<Direction>, rng: &mut impl Rng) -> TickOutcome {
        if let Some(reason) = self.ended {
            return TickOutcome::Over(reason);
        }
        let Some(head) = self.head() else {
            return self.end(EndReason::SelfCollision);
        };

        if let Some(direction) = input {
            self.steer(direction);
        }

        let new_head = head.step(self.direction);
        if self.field.is_wall(new_head) {
            return self.end(EndReason::Wall);
        }

        self.body.push_front(new_head);
        let ate = self.food == Some(new_head);
        if ate {
            self.score += 1;
            self.food = place_food(&self.field, &self.body, rng);
        } else {
            self.body.pop_back();
        }

        // Checked after the tail moved, so following the tail is legal.
        if self.body.iter().skip(1).any(|&c| c == new_head) {
            return self.end(EndReason::SelfCollision);
        }
        if ate && self.food.is_none() {
            return self.end(EndReason::BoardFull);
        }

        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.ended = Some(reason);
        TickOutcome::Over(reason)
    }
}

/// Pick a food cell uniformly among the free spawn cells.
pub fn place_food(field: &Playfield, body: &VecDeque<Cell>, rng: &mut impl Rng) -> Option<Cell> {
    let occupied: HashSet<Cell> = body.iter().copied().collect();
    let free: Vec<Cell> = field.food_cells().filter(|c| !occupied.contains(c)).collect();
    free.choose(rng).copied()
}

/// Run the snake screen until the game ends or the player quits.
///
/// Either way the score summary stays up until one more key.
pub fn run<S: Surface, R: Rng>(
    surface: &mut S,
    theme: &Theme,
    rng: &mut R,
) -> Result<(), SurfaceError> {
    surface.clear();
    let (rows, cols) = surface.size();
    if rows < SNAKE_MIN_ROWS || cols < SNAKE_MIN_COLS {
        log::info!("snake refused: terminal is {}x{}", rows, cols);
        surface.draw(0, 0, TOO_SMALL_MESSAGE, theme.text_style());
        surface.refresh()?;
        surface.poll_key(None)?;
        return Ok(());
    }

    surface.set_cursor_visible(false)?;
    let mut game = SnakeState::new(Playfield::new(rows as i32, cols as i32), rng);
    let tick = Duration::from_millis(SNAKE_TICK_MS);

    loop {
        render(surface, &game, theme)?;
        let key = surface.poll_key(Some(tick))?;
        if key.is_some_and(|k| k.is_quit()) {
            log::info!("snake quit, score {}", game.score());
            break;
        }
        if let TickOutcome::Over(reason) = game.tick(key.and_then(Direction::from_key), rng) {
            log::info!("snake game over ({:?}), score {}", reason, game.score());
            break;
        }
    }

    render_game_over(surface, game.score(), theme)?;
    surface.poll_key(None)?;
    Ok(())
}

fn render(surface: &mut impl Surface, game: &SnakeState, theme: &Theme) -> Result<(), SurfaceError> {
    surface.clear();
    let field = game.field();
    draw_box(surface, 0, 0, field.rows, field.cols, theme.border_style());
    surface.draw(0, 2, &format!(" SCORE: {} ", game.score()), theme.title_style());

    let head_style = Style::default().fg(theme.warning);
    let body_style = Style::default().fg(theme.accent);
    for (i, cell) in game.body().iter().enumerate() {
        let (glyph, style) = if i == 0 {
            (SNAKE_HEAD_GLYPH, head_style)
        } else {
            (SNAKE_BODY_GLYPH, body_style)
        };
        surface.draw_char(cell.row, cell.col, glyph, style);
    }

    if let Some(food) = game.food() {
        surface.draw_char(food.row, food.col, FOOD_GLYPH, Style::default().fg(theme.danger));
    }
    surface.refresh()
}

fn render_game_over(surface: &mut impl Surface, score: u32, theme: &Theme) -> Result<(), SurfaceError> {
    surface.clear();
    let (rows, _) = surface.size();
    let mid = rows as i32 / 2;
    draw_centered(surface, mid - 1, "GAME OVER!", theme.heading_style(theme.danger));
    draw_centered(surface, mid, &format!("Your Score: {}", score), theme.text_style());
    draw_centered(surface, mid + 2, "Press any key to continue", theme.dim_style());
    surface.refresh()
}
