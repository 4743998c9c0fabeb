use ratatui::style::Style;

use super::theme::Theme;
use crate::constants::*;
use crate::surface::Surface;

/// Color classification of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    /// Below 50%.
    Low,
    /// 50% up to 80%.
    Mid,
    /// 80% and above.
    High,
}

impl GaugeBand {
    pub fn classify(percent: f32) -> Self {
        if percent >= GAUGE_HIGH_PCT {
            GaugeBand::High
        } else if percent >= GAUGE_MID_PCT {
            GaugeBand::Mid
        } else {
            GaugeBand::Low
        }
    }
}

/// A horizontal bar gauge: filled cells for the percentage, shaded cells for the rest.
pub struct GaugeBar {
    pub percent: f32,
    pub width: u16,
}

impl GaugeBar {
    pub fn new(percent: f32, width: u16) -> Self {
        Self { percent, width }
    }

    /// Number of filled cells: `floor(width * percent / 100)`, clamped to the bar.
    pub fn filled(&self) -> u16 {
        if !self.percent.is_finite() {
            return 0;
        }
        let cells = (self.width as f32 * self.percent / 100.0).floor();
        cells.clamp(0.0, self.width as f32) as u16
    }

    pub fn band(&self) -> GaugeBand {
        GaugeBand::classify(self.percent)
    }

    /// The bar as text, exactly `width` glyphs long.
    pub fn glyphs(&self) -> String {
        let filled = self.filled() as usize;
        let mut bar = String::with_capacity(self.width as usize * 3);
        bar.extend(std::iter::repeat(GAUGE_FILLED_GLYPH).take(filled));
        bar.extend(std::iter::repeat(GAUGE_EMPTY_GLYPH).take(self.width as usize - filled));
        bar
    }

    /// Draw the bar at `(row, col)` with the percentage two cells to its right.
    pub fn draw(&self, surface: &mut impl Surface, row: i32, col: i32, theme: &Theme) {
        let filled = self.filled();
        let bar = self.glyphs();
        let (done, rest) = bar.split_at(filled as usize * GAUGE_FILLED_GLYPH.len_utf8());
        surface.draw(row, col, done, Style::default().fg(theme.band_color(self.band())));
        surface.draw(row, col + filled as i32, rest, Style::default().fg(theme.gauge_bg));
        surface.draw(
            row,
            col + self.width as i32 + 2,
            &format!("{:.1}%", self.percent),
            theme.text_style(),
        );
    }
}

/// An all-empty bar labelled `n/a`, for a reading the source could not provide.
pub fn draw_unavailable_gauge(surface: &mut impl Surface, row: i32, col: i32, width: u16, theme: &Theme) {
    let bar: String = std::iter::repeat(GAUGE_EMPTY_GLYPH).take(width as usize).collect();
    surface.draw(row, col, &bar, Style::default().fg(theme.gauge_bg));
    surface.draw(row, col + width as i32 + 2, UNAVAILABLE, theme.dim_style());
}
