//! Main menu: a circular cursor over a fixed list of destinations.

use crate::constants::*;
use crate::error::SurfaceError;
use crate::surface::Surface;
use crate::ui::helpers::{centered_col, draw_box};
use crate::ui::Theme;

/// Block-letter glyphs for the logo, six rows each.
const GLYPH_S: [&str; 6] = [
    "███████╗",
    "██╔════╝",
    "███████╗",
    "╚════██║",
    "███████║",
    "╚══════╝",
];
const GLYPH_Y: [&str; 6] = [
    "██╗   ██╗",
    "╚██╗ ██╔╝",
    " ╚████╔╝ ",
    "  ╚██╔╝  ",
    "   ██║   ",
    "   ╚═╝   ",
];
const GLYPH_T: [&str; 6] = [
    "████████╗",
    "╚══██╔══╝",
    "   ██║   ",
    "   ██║   ",
    "   ██║   ",
    "   ╚═╝   ",
];
const GLYPH_E: [&str; 6] = [
    "███████╗",
    "██╔════╝",
    "█████╗  ",
    "██╔══╝  ",
    "███████╗",
    "╚══════╝",
];
const GLYPH_M: [&str; 6] = [
    "███╗   ███╗",
    "████╗ ████║",
    "██╔████╔██║",
    "██║╚██╔╝██║",
    "██║ ╚═╝ ██║",
    "╚═╝     ╚═╝",
];
const GLYPH_B: [&str; 6] = [
    "██████╗ ",
    "██╔══██╗",
    "██████╔╝",
    "██╔══██╗",
    "██████╔╝",
    "╚═════╝ ",
];
const GLYPH_O: [&str; 6] = [
    " ██████╗ ",
    "██╔═══██╗",
    "██║   ██║",
    "██║   ██║",
    "╚██████╔╝",
    " ╚═════╝ ",
];

const LOGO_WORD: [&[&str; 6]; 9] = [
    &GLYPH_S, &GLYPH_Y, &GLYPH_S, &GLYPH_T, &GLYPH_E, &GLYPH_M, &GLYPH_B, &GLYPH_O, &GLYPH_T,
];

/// The logo, one string per row.
pub fn logo_lines() -> Vec<String> {
    (0..6)
        .map(|row| LOGO_WORD.iter().map(|glyph| glyph[row]).collect())
        .collect()
}

/// Where the menu can send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Snake,
    TicTacToe,
    Dashboard,
    Exit,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::Snake,
        Destination::TicTacToe,
        Destination::Dashboard,
        Destination::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Destination::Snake => "Play Snake",
            Destination::TicTacToe => "Play Tic-Tac-Toe",
            Destination::Dashboard => "System Dashboard",
            Destination::Exit => "Exit",
        }
    }
}

/// What activating the selection asks the root loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction<T> {
    Open(T),
    Quit,
}

/// Selection cursor over a fixed, non-empty list of entries.
///
/// The last entry is the terminal "exit" entry.
#[derive(Debug, Clone)]
pub struct Menu<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T: Copy> Menu<T> {
    /// Returns `None` for an empty list.
    #[cfg(test)]
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items, selected: 0 })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> T {
        self.items[self.selected]
    }

    pub fn move_up(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Select entry `index`; out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn activate(&self) -> MenuAction<T> {
        if self.selected == self.items.len() - 1 {
            MenuAction::Quit
        } else {
            MenuAction::Open(self.selected())
        }
    }
}

impl Default for Menu<Destination> {
    fn default() -> Self {
        Self {
            items: Destination::ALL.to_vec(),
            selected: 0,
        }
    }
}

/// Draw the full menu: logo, bordered box, highlighted selection, instructions.
pub fn render(
    surface: &mut impl Surface,
    menu: &Menu<Destination>,
    theme: &Theme,
) -> Result<(), SurfaceError> {
    surface.clear();
    let (_, cols) = surface.size();

    let logo = logo_lines();
    for (i, line) in logo.iter().enumerate() {
        surface.draw(
            LOGO_TOP + i as i32,
            centered_col(cols, line),
            line,
            theme.title_style(),
        );
    }

    let count = menu.items().len() as i32;
    let box_top = LOGO_TOP + logo.len() as i32 + 2;
    let box_left = (cols as i32 - MENU_BOX_WIDTH).div_euclid(2);
    draw_box(
        surface,
        box_top,
        box_left,
        count + 4,
        MENU_BOX_WIDTH,
        theme.border_style().fg(theme.highlight),
    );
    surface.draw(
        box_top + 1,
        box_left + 2,
        "SYSTEMBOT - MAIN MENU",
        theme.heading_style(theme.accent_secondary),
    );

    for (i, item) in menu.items().iter().enumerate() {
        let row = box_top + 3 + i as i32;
        if i == menu.selected_index() {
            surface.draw(row, box_left + 4, &format!("> {} <", item.label()), theme.selected_style());
        } else {
            surface.draw(row, box_left + 4, &format!("  {}  ", item.label()), theme.text_style());
        }
    }

    let help_top = box_top + count + 5;
    surface.draw(
        help_top,
        box_left + 2,
        &format!("Up/Down or 1-{} to navigate, Enter to select", count),
        theme.dim_style(),
    );
    surface.draw(
        help_top + 1,
        box_left + 2,
        "Press 'q' in any screen to return here",
        theme.dim_style(),
    );
    surface.refresh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::memory::MemorySurface;
    use ratatui::style::Modifier;

    // ── Menu ──────────────────────────────────────────────────────

    #[test]
    fn empty_menu_is_rejected() {
        assert!(Menu::<u8>::new(Vec::new()).is_none());
    }

    #[test]
    fn move_down_wraps_for_any_size() {
        for n in 1..=12usize {
            for start in 0..n {
                let mut menu = Menu::new((0..n).collect::<Vec<_>>()).unwrap();
                menu.jump_to(start);
                for _ in 0..n {
                    menu.move_down();
                }
                assert_eq!(menu.selected_index(), start, "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn move_up_wraps_for_any_size() {
        for n in 1..=12usize {
            for start in 0..n {
                let mut menu = Menu::new((0..n).collect::<Vec<_>>()).unwrap();
                menu.jump_to(start);
                for _ in 0..n {
                    menu.move_up();
                }
                assert_eq!(menu.selected_index(), start, "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn move_up_from_top_goes_to_bottom() {
        let mut menu = Menu::default();
        menu.move_up();
        assert_eq!(menu.selected(), Destination::Exit);
        menu.move_down();
        assert_eq!(menu.selected(), Destination::Snake);
    }

    #[test]
    fn jump_to_valid_and_invalid() {
        let mut menu = Menu::default();
        menu.jump_to(2);
        assert_eq!(menu.selected(), Destination::Dashboard);
        menu.jump_to(4);
        assert_eq!(menu.selected(), Destination::Dashboard);
        menu.jump_to(usize::MAX);
        assert_eq!(menu.selected_index(), 2);
    }

    #[test]
    fn activate_exit_quits_and_others_open() {
        let mut menu = Menu::default();
        assert_eq!(menu.activate(), MenuAction::Open(Destination::Snake));
        menu.jump_to(1);
        assert_eq!(menu.activate(), MenuAction::Open(Destination::TicTacToe));
        menu.jump_to(3);
        assert_eq!(menu.activate(), MenuAction::Quit);
    }

    // ── Rendering ─────────────────────────────────────────────────

    #[test]
    fn logo_rows_have_equal_width() {
        let lines = logo_lines();
        assert_eq!(lines.len(), 6);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{:?}", widths);
    }

    #[test]
    fn render_highlights_selection() {
        let mut menu = Menu::default();
        menu.jump_to(2);
        let mut s = MemorySurface::new(30, 100);
        render(&mut s, &menu, &Theme::default()).unwrap();

        assert!(s.contains("SYSTEMBOT - MAIN MENU"));
        assert!(s.contains("> System Dashboard <"));
        assert!(s.contains("  Play Snake  "));
        assert!(!s.contains("> Play Snake <"));

        // Box sits at row 10 (logo at 2..8 plus a gap); entries start 3 rows in.
        let row = 10 + 3 + 2;
        let col = (100 - MENU_BOX_WIDTH as u16) / 2 + 4;
        let (glyph, style) = s.cell(row, col).unwrap();
        assert_eq!(glyph, ">");
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn render_on_tiny_terminal_does_not_panic() {
        let menu = Menu::default();
        let mut s = MemorySurface::new(5, 10);
        render(&mut s, &menu, &Theme::default()).unwrap();
        assert_eq!(s.refreshes, 1);
    }
}
