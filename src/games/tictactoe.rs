//! Tic-tac-toe against a rule-based computer opponent.

use rand::{seq::SliceRandom, Rng};

use crate::constants::*;
use crate::error::SurfaceError;
use crate::surface::Surface;
use crate::ui::helpers::{centered_col, draw_centered};
use crate::ui::Theme;

/// All eight winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Mark {
    pub fn glyph(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::Player => PLAYER_GLYPH,
            Mark::Computer => COMPUTER_GLYPH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    PlayerWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Pending
    }
}

/// A 3x3 board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_cells(cells: [Mark; 9]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; 9] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_free(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Place `mark` on a free cell. Returns false (and changes nothing) otherwise.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if mark == Mark::Empty || !self.is_free(index) {
            return false;
        }
        self.cells[index] = mark;
        true
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i] == Mark::Empty).collect()
    }

    /// The mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let m = self.cells[a];
            (m != Mark::Empty && m == self.cells[b] && m == self.cells[c]).then_some(m)
        })
    }

    /// Outcome derived from board contents alone.
    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(Mark::Player) => Outcome::PlayerWin,
            Some(Mark::Computer) => Outcome::ComputerWin,
            _ if self.cells.iter().all(|&m| m != Mark::Empty) => Outcome::Draw,
            _ => Outcome::Pending,
        }
    }

    /// First free cell where `mark` would complete a line.
    fn winning_move(&self, mark: Mark) -> Option<usize> {
        self.empty_cells().into_iter().find(|&i| {
            let mut trial = *self;
            trial.cells[i] = mark;
            trial.winner() == Some(mark)
        })
    }
}

/// Computer's choice: win if possible, else block, else a random free cell.
pub fn computer_move(board: &Board, rng: &mut impl Rng) -> Option<usize> {
    board
        .winning_move(Mark::Computer)
        .or_else(|| board.winning_move(Mark::Player))
        .or_else(|| board.empty_cells().choose(rng).copied())
}

/// Game state: board, whose turn, and the (forward-only) outcome.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    turn: Turn,
    outcome: Outcome,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Resume from a position with the player to move.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            turn: Turn::Player,
            outcome: board.outcome(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The human half of a turn: place the player's mark on a free cell.
    ///
    /// Returns false (and changes nothing) for an occupied or invalid cell, or
    /// once the game is over. Leaves the computer to move if the game goes on.
    pub fn player_move(&mut self, index: usize) -> bool {
        if self.outcome.is_over() || self.turn != Turn::Player {
            return false;
        }
        if !self.board.place(index, Mark::Player) {
            return false;
        }
        self.settle(Turn::Computer);
        true
    }

    /// The computer's reply. Does nothing unless it is the computer's turn in
    /// an unfinished game.
    pub fn computer_turn(&mut self, rng: &mut impl Rng) -> Option<usize> {
        if self.outcome.is_over() || self.turn != Turn::Computer {
            return None;
        }
        let index = computer_move(&self.board, rng)?;
        self.board.place(index, Mark::Computer);
        self.settle(Turn::Player);
        Some(index)
    }

    fn settle(&mut self, next: Turn) {
        self.outcome = self.board.outcome();
        if !self.outcome.is_over() {
            self.turn = next;
        }
    }
}

/// Run the tic-tac-toe screen until the game ends or the player quits.
///
/// Either way the final board stays up until one more key.
pub fn run<S: Surface, R: Rng>(
    surface: &mut S,
    theme: &Theme,
    rng: &mut R,
) -> Result<(), SurfaceError> {
    surface.set_cursor_visible(false)?;
    let mut game = TicTacToe::new();

    while !game.outcome().is_over() {
        render(surface, &game, false, theme)?;
        let Some(key) = surface.poll_key(None)? else {
            continue;
        };
        if key.is_quit() {
            break;
        }
        // Keys 1-9 map to cells 0-8
        let Some(index) = key.digit().filter(|d| (1..=9).contains(d)).map(|d| d - 1) else {
            continue;
        };
        if !game.player_move(index) {
            continue;
        }
        render(surface, &game, false, theme)?;
        game.computer_turn(rng);
    }

    if game.outcome().is_over() {
        log::info!("tic-tac-toe finished: {:?}", game.outcome());
    } else {
        log::info!("tic-tac-toe quit");
    }
    render(surface, &game, true, theme)?;
    surface.poll_key(None)?;
    Ok(())
}

fn status_line(game: &TicTacToe) -> String {
    match game.outcome() {
        Outcome::PlayerWin => "YOU WIN!".to_string(),
        Outcome::ComputerWin => "COMPUTER WINS!".to_string(),
        Outcome::Draw => "IT'S A DRAW!".to_string(),
        Outcome::Pending => match game.turn() {
            Turn::Player => format!("Your turn ({}) - use number keys 1-9", PLAYER_GLYPH),
            Turn::Computer => "Computer is thinking...".to_string(),
        },
    }
}

/// Draw title, board, status and hint. `finished` switches the hint to the
/// dismiss prompt.
fn render(
    surface: &mut impl Surface,
    game: &TicTacToe,
    finished: bool,
    theme: &Theme,
) -> Result<(), SurfaceError> {
    surface.clear();
    let (rows, cols) = surface.size();

    let title = format!(
        "TIC TAC TOE (You: {}, Computer: {})",
        PLAYER_GLYPH, COMPUTER_GLYPH
    );
    draw_centered(surface, 1, &title, theme.title_style());

    let cells = game.board().cells();
    let divider = "---+---+---";
    let left = centered_col(cols, divider);
    for r in 0..3 {
        let row = BOARD_TOP + r as i32 * 2;
        let line = format!(
            " {} | {} | {} ",
            cells[r * 3].glyph(),
            cells[r * 3 + 1].glyph(),
            cells[r * 3 + 2].glyph()
        );
        surface.draw(row, left, &line, theme.text_style());
        if r < 2 {
            surface.draw(row + 1, left, divider, theme.border_style());
        }
    }

    let status_style = match game.outcome() {
        Outcome::PlayerWin => theme.heading_style(theme.success),
        Outcome::ComputerWin => theme.heading_style(theme.danger),
        Outcome::Draw => theme.heading_style(theme.warning),
        Outcome::Pending => theme.text_style(),
    };
    draw_centered(surface, BOARD_STATUS_ROW, &status_line(game), status_style);

    let hint = if finished {
        "Press any key to return"
    } else {
        "Press 'q' to return to menu"
    };
    draw_centered(surface, rows as i32 - 2, hint, theme.dim_style());
    surface.refresh()
}
