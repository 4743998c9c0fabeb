//! Shared layout helpers: text width, centering, box drawing.

use ratatui::{style::Style, symbols::line};
use unicode_width::UnicodeWidthStr;

use crate::surface::Surface;

/// Display width of `s` in terminal cells.
pub fn text_width(s: &str) -> i32 {
    s.width() as i32
}

/// Column at which `text` is horizontally centered in `cols` columns.
///
/// Negative when the text is wider than the screen; drawing clips it.
pub fn centered_col(cols: u16, text: &str) -> i32 {
    (cols as i32 - text_width(text)).div_euclid(2)
}

/// Draw `text` centered on `row`.
pub fn draw_centered(surface: &mut impl Surface, row: i32, text: &str, style: Style) {
    let (_, cols) = surface.size();
    surface.draw(row, centered_col(cols, text), text, style);
}

/// Draw a single-line box with its top-left corner at `(top, left)`.
pub fn draw_box(surface: &mut impl Surface, top: i32, left: i32, height: i32, width: i32, style: Style) {
    if height < 2 || width < 2 {
        return;
    }
    let bottom = top + height - 1;
    let right = left + width - 1;
    let set = line::NORMAL;

    let horizontal = set.horizontal.repeat((width - 2) as usize);
    surface.draw(top, left + 1, &horizontal, style);
    surface.draw(bottom, left + 1, &horizontal, style);
    for row in top + 1..bottom {
        surface.draw(row, left, set.vertical, style);
        surface.draw(row, right, set.vertical, style);
    }
    surface.draw(top, left, set.top_left, style);
    surface.draw(top, right, set.top_right, style);
    surface.draw(bottom, left, set.bottom_left, style);
    surface.draw(bottom, right, set.bottom_right, style);
}
