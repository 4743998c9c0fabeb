pub mod helpers;
pub mod theme;
pub mod widgets;

pub use theme::Theme;
pub use widgets::{draw_unavailable_gauge, GaugeBar};
