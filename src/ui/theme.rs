use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use super::widgets::GaugeBand;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    /// Logo, screen titles, system panel.
    pub accent: Color,
    /// Menu title.
    pub accent_secondary: Color,
    /// Menu box, network panel.
    pub highlight: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // ── Gauges ───────────────────────────────────────────────
    pub gauge_low: Color,
    pub gauge_mid: Color,
    pub gauge_high: Color,
    pub gauge_bg: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme: the classic green/yellow/cyan/red/magenta terminal set.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Cyan,
            accent_secondary: Color::Yellow,
            highlight: Color::Magenta,
            text_primary: Color::Reset,
            text_dim: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            gauge_low: Color::Green,
            gauge_mid: Color::Yellow,
            gauge_high: Color::Red,
            gauge_bg: Color::DarkGray,
            border: Color::Reset,
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(131, 165, 152),           // blue
            accent_secondary: Color::Rgb(250, 189, 47),  // yellow bright
            highlight: Color::Rgb(211, 134, 155),        // purple
            text_primary: Color::Rgb(235, 219, 178),     // fg
            text_dim: Color::Rgb(168, 153, 132),         // fg4
            success: Color::Rgb(142, 192, 124),          // green
            warning: Color::Rgb(250, 189, 47),
            danger: Color::Rgb(251, 73, 52),             // red
            gauge_low: Color::Rgb(142, 192, 124),
            gauge_mid: Color::Rgb(250, 189, 47),
            gauge_high: Color::Rgb(251, 73, 52),
            gauge_bg: Color::Rgb(60, 56, 54),
            border: Color::Rgb(80, 73, 69),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(235, 203, 139), // nord13 yellow
            highlight: Color::Rgb(180, 142, 173),        // nord15 purple
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140),          // nord14 green
            warning: Color::Rgb(235, 203, 139),
            danger: Color::Rgb(191, 97, 106),            // nord11 red
            gauge_low: Color::Rgb(163, 190, 140),
            gauge_mid: Color::Rgb(235, 203, 139),
            gauge_high: Color::Rgb(191, 97, 106),
            gauge_bg: Color::Rgb(59, 66, 82),
            border: Color::Rgb(76, 86, 106),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }

    /// Resolve a theme name: built-ins first, then a custom theme file.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name)
            .or_else(|| Self::from_toml_file(&crate::constants::custom_theme_path(name)))
            .unwrap_or_else(|| {
                log::warn!(
                    "unknown theme '{}' (built-ins: {}), using default",
                    name,
                    BUILTIN_THEME_NAMES.join(", ")
                );
                Self::default()
            })
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::from_toml_str(
            &content,
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom"),
        )
    }

    fn from_toml_str(content: &str, name: &str) -> Option<Self> {
        let file: ThemeFile = toml::from_str(content).ok()?;
        Some(file.into_theme(name))
    }

    // ── Styles ───────────────────────────────────────────────

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Bold panel heading in the given color.
    pub fn heading_style(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Returns the color for a gauge band.
    pub fn band_color(&self, band: GaugeBand) -> Color {
        match band {
            GaugeBand::Low => self.gauge_low,
            GaugeBand::Mid => self.gauge_mid,
            GaugeBand::High => self.gauge_high,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional; missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    accent_secondary: Option<String>,
    highlight: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    gauge_low: Option<String>,
    gauge_mid: Option<String>,
    gauge_high: Option<String>,
    gauge_bg: Option<String>,
    border: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            accent_secondary: parse_color(&self.accent_secondary).unwrap_or(base.accent_secondary),
            highlight: parse_color(&self.highlight).unwrap_or(base.highlight),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            gauge_low: parse_color(&self.gauge_low).unwrap_or(base.gauge_low),
            gauge_mid: parse_color(&self.gauge_mid).unwrap_or(base.gauge_mid),
            gauge_high: parse_color(&self.gauge_high).unwrap_or(base.gauge_high),
            gauge_bg: parse_color(&self.gauge_bg).unwrap_or(base.gauge_bg),
            border: parse_color(&self.border).unwrap_or(base.border),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_color ───────────────────────────────────────────────

    #[test]
    fn parse_color_with_and_without_hash() {
        assert_eq!(parse_color(&Some("#FF8800".to_string())), Some(Color::Rgb(255, 136, 0)));
        assert_eq!(parse_color(&Some("ff8800".to_string())), Some(Color::Rgb(255, 136, 0)));
    }

    #[test]
    fn parse_color_rejects_bad_input() {
        assert_eq!(parse_color(&None), None);
        assert_eq!(parse_color(&Some("#FFF".to_string())), None);
        assert_eq!(parse_color(&Some("#GGHHII".to_string())), None);
    }

    // ── by_name ───────────────────────────────────────────────────

    #[test]
    fn by_name_all_builtins() {
        for &name in BUILTIN_THEME_NAMES {
            let theme = Theme::by_name(name);
            assert!(theme.is_some(), "Theme '{}' should exist", name);
            assert_eq!(theme.map(|t| t.name), Some(name.to_string()));
        }
    }

    #[test]
    fn by_name_case_insensitive() {
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    // ── band_color ────────────────────────────────────────────────

    #[test]
    fn band_colors_follow_gauge_palette() {
        let t = Theme::default_dark();
        assert_eq!(t.band_color(GaugeBand::Low), t.gauge_low);
        assert_eq!(t.band_color(GaugeBand::Mid), t.gauge_mid);
        assert_eq!(t.band_color(GaugeBand::High), t.gauge_high);
    }

    // ── custom themes ─────────────────────────────────────────────

    #[test]
    fn custom_theme_inherits_missing_fields() {
        let theme = Theme::from_toml_str("accent = \"#010203\"\n", "mine").unwrap();
        let base = Theme::default_dark();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.danger, base.danger);
    }

    #[test]
    fn custom_theme_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocean.toml");
        std::fs::write(&path, "gauge_high = \"#FF0000\"\n").unwrap();
        let theme = Theme::from_toml_file(&path).unwrap();
        assert_eq!(theme.name, "ocean");
        assert_eq!(theme.gauge_high, Color::Rgb(255, 0, 0));
    }
}
