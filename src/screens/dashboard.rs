//! Live host-metrics dashboard: sample, derive, redraw, poll, every 500 ms.

use std::fmt::Display;
use std::time::Duration;

use chrono::{Local, TimeZone, Utc};

use crate::constants::*;
use crate::error::SurfaceError;
use crate::models::{MetricsSnapshot, UsageStats};
use crate::monitor::MetricsSource;
use crate::surface::Surface;
use crate::ui::helpers::draw_centered;
use crate::ui::{draw_unavailable_gauge, GaugeBar, Theme};

/// Display-ready values derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cpu_percent: Option<f32>,
    pub cpu_usage: String,
    pub memory_percent: Option<f32>,
    pub memory_total: String,
    pub memory_used: String,
    pub disk_percent: Option<f32>,
    pub disk_total: String,
    pub disk_used: String,
    pub net_sent: String,
    pub net_recv: String,
    pub packets_sent: String,
    pub packets_recv: String,
    pub hostname: String,
    pub os: String,
    pub uptime: String,
    pub boot: String,
}

impl DashboardView {
    /// Derive the view; `now` is seconds since the Unix epoch.
    pub fn from_snapshot<Tz>(snapshot: &MetricsSnapshot, now: i64, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (memory_total, memory_used) = usage_lines(snapshot.memory);
        let (disk_total, disk_used) = usage_lines(snapshot.disk);
        let net = snapshot.network;

        let os = match (&snapshot.os_name, &snapshot.os_release) {
            (Some(name), Some(release)) => format!("{} {}", name, release),
            (Some(name), None) => name.clone(),
            (None, Some(release)) => release.clone(),
            (None, None) => UNAVAILABLE.to_string(),
        };

        Self {
            cpu_percent: snapshot.cpu_percent,
            cpu_usage: or_unavailable(snapshot.cpu_percent.map(|p| format!("{:.1}%", p))),
            memory_percent: snapshot.memory.map(|m| m.percent),
            memory_total,
            memory_used,
            disk_percent: snapshot.disk.map(|d| d.percent),
            disk_total,
            disk_used,
            net_sent: or_unavailable(net.map(|n| format!("{} MB", n.bytes_sent / ONE_MIB))),
            net_recv: or_unavailable(net.map(|n| format!("{} MB", n.bytes_recv / ONE_MIB))),
            packets_sent: or_unavailable(net.map(|n| n.packets_sent.to_string())),
            packets_recv: or_unavailable(net.map(|n| n.packets_recv.to_string())),
            hostname: or_unavailable(snapshot.hostname.clone()),
            os,
            uptime: or_unavailable(
                snapshot
                    .boot_time
                    .map(|boot| format_uptime(now.saturating_sub(boot as i64).max(0) as u64)),
            ),
            boot: or_unavailable(snapshot.boot_time.and_then(|boot| format_boot_time(boot, tz))),
        }
    }
}

fn or_unavailable(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// `("N GB", "N GB (P%)")` for total and used.
fn usage_lines(usage: Option<UsageStats>) -> (String, String) {
    match usage {
        Some(u) => (
            format!("{} GB", u.total_bytes / ONE_GIB),
            format!("{} GB ({:.1}%)", u.used_bytes / ONE_GIB, u.percent),
        ),
        None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    }
}

/// Seconds as `Nd Nh Nm`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

/// Epoch seconds as `YYYY-MM-DD HH:MM:SS` in `tz`.
pub fn format_boot_time<Tz>(epoch: u64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let secs = i64::try_from(epoch).ok()?;
    tz.timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Run the dashboard until the quit key.
pub fn run<S: Surface, M: MetricsSource>(
    surface: &mut S,
    source: &mut M,
    theme: &Theme,
) -> Result<(), SurfaceError> {
    surface.set_cursor_visible(false)?;
    let tick = Duration::from_millis(DASHBOARD_TICK_MS);

    loop {
        let snapshot = source.sample();
        let view = DashboardView::from_snapshot(&snapshot, Utc::now().timestamp(), &Local);
        render(surface, &view, theme)?;

        // The poll is the tick delay.
        if surface.poll_key(Some(tick))?.is_some_and(|k| k.is_quit()) {
            return Ok(());
        }
    }
}

fn render(surface: &mut impl Surface, view: &DashboardView, theme: &Theme) -> Result<(), SurfaceError> {
    surface.clear();
    let (rows, _) = surface.size();
    let text = theme.text_style();

    draw_centered(surface, 1, "SYSTEM DASHBOARD", theme.title_style());

    // Left column
    surface.draw(3, 2, "CPU", theme.heading_style(theme.success));
    surface.draw(4, 4, &format!("Usage: {}", view.cpu_usage), text);
    draw_gauge(surface, 5, view.cpu_percent, theme);

    surface.draw(7, 2, "MEMORY", theme.heading_style(theme.warning));
    surface.draw(8, 4, &format!("Total: {}", view.memory_total), text);
    surface.draw(9, 4, &format!("Used:  {}", view.memory_used), text);
    draw_gauge(surface, 10, view.memory_percent, theme);

    surface.draw(12, 2, "DISK", theme.heading_style(theme.danger));
    surface.draw(13, 4, &format!("Total: {}", view.disk_total), text);
    surface.draw(14, 4, &format!("Used:  {}", view.disk_used), text);
    draw_gauge(surface, 15, view.disk_percent, theme);

    // Right column
    let col = DASHBOARD_RIGHT_COL;
    surface.draw(3, col, "NETWORK", theme.heading_style(theme.highlight));
    surface.draw(4, col + 2, &format!("Sent:     {}", view.net_sent), text);
    surface.draw(5, col + 2, &format!("Received: {}", view.net_recv), text);
    surface.draw(6, col + 2, &format!("Packets Sent: {}", view.packets_sent), text);
    surface.draw(7, col + 2, &format!("Packets Recv: {}", view.packets_recv), text);

    surface.draw(9, col, "SYSTEM", theme.heading_style(theme.accent));
    surface.draw(10, col + 2, &format!("Hostname: {}", view.hostname), text);
    surface.draw(11, col + 2, &format!("OS: {}", view.os), text);
    surface.draw(12, col + 2, &format!("Uptime: {}", view.uptime), text);
    surface.draw(13, col + 2, &format!("Boot: {}", view.boot), text);

    surface.draw(
        rows as i32 - 2,
        2,
        " Press 'q' to return to menu ",
        theme.selected_style(),
    );
    surface.refresh()
}

fn draw_gauge(surface: &mut impl Surface, row: i32, percent: Option<f32>, theme: &Theme) {
    match percent {
        Some(percent) => GaugeBar::new(percent, GAUGE_WIDTH).draw(surface, row, 4, theme),
        None => draw_unavailable_gauge(surface, row, 4, GAUGE_WIDTH, theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetworkCounters;
    use crate::surface::memory::MemorySurface;
    use crate::surface::Key;

    /// Replays canned snapshots, repeating the last one.
    struct FakeSource {
        snapshots: Vec<MetricsSnapshot>,
        calls: usize,
    }

    impl MetricsSource for FakeSource {
        fn sample(&mut self) -> MetricsSnapshot {
            let i = self.calls.min(self.snapshots.len().saturating_sub(1));
            self.calls += 1;
            self.snapshots.get(i).cloned().unwrap_or_default()
        }
    }

    fn full_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_percent: Some(12.5),
            memory: UsageStats::from_bytes(16 * ONE_GIB, 4 * ONE_GIB),
            disk: UsageStats::from_bytes(100 * ONE_GIB, 85 * ONE_GIB),
            network: Some(NetworkCounters {
                bytes_sent: 5 * ONE_MIB + 10,
                bytes_recv: 300 * ONE_MIB,
                packets_sent: 1234,
                packets_recv: 5678,
            }),
            hostname: Some("box".to_string()),
            os_name: Some("Linux".to_string()),
            os_release: Some("6.1.0".to_string()),
            boot_time: Some(1_000_000),
        }
    }

    // ── Derived values ────────────────────────────────────────────

    #[test]
    fn uptime_decomposition() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(59), "0d 0h 0m");
        assert_eq!(format_uptime(3_600 + 120), "0d 1h 2m");
        assert_eq!(format_uptime(2 * 86_400 + 5 * 3_600 + 7 * 60 + 30), "2d 5h 7m");
    }

    #[test]
    fn boot_time_format() {
        assert_eq!(format_boot_time(0, &Utc).as_deref(), Some("1970-01-01 00:00:00"));
        assert_eq!(
            format_boot_time(1_700_000_000, &Utc).as_deref(),
            Some("2023-11-14 22:13:20")
        );
    }

    #[test]
    fn view_from_full_snapshot() {
        let now = 1_000_000 + 86_400 + 3_660;
        let view = DashboardView::from_snapshot(&full_snapshot(), now, &Utc);

        assert_eq!(view.cpu_usage, "12.5%");
        assert_eq!(view.memory_total, "16 GB");
        assert_eq!(view.memory_used, "4 GB (25.0%)");
        assert_eq!(view.disk_percent, Some(85.0));
        assert_eq!(view.net_sent, "5 MB");
        assert_eq!(view.net_recv, "300 MB");
        assert_eq!(view.packets_sent, "1234");
        assert_eq!(view.os, "Linux 6.1.0");
        assert_eq!(view.uptime, "1d 1h 1m");
        assert_eq!(view.boot, "1970-01-12 13:46:40");
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let view = DashboardView::from_snapshot(&MetricsSnapshot::default(), 0, &Utc);
        assert_eq!(view.cpu_usage, UNAVAILABLE);
        assert_eq!(view.cpu_percent, None);
        assert_eq!(view.memory_used, UNAVAILABLE);
        assert_eq!(view.disk_total, UNAVAILABLE);
        assert_eq!(view.net_recv, UNAVAILABLE);
        assert_eq!(view.hostname, UNAVAILABLE);
        assert_eq!(view.os, UNAVAILABLE);
        assert_eq!(view.uptime, UNAVAILABLE);
        assert_eq!(view.boot, UNAVAILABLE);
    }

    #[test]
    fn boot_in_the_future_clamps_uptime() {
        let view = DashboardView::from_snapshot(&full_snapshot(), 10, &Utc);
        assert_eq!(view.uptime, "0d 0h 0m");
    }

    // ── Loop ──────────────────────────────────────────────────────

    #[test]
    fn samples_once_per_tick_until_quit() {
        let mut source = FakeSource {
            snapshots: vec![full_snapshot()],
            calls: 0,
        };
        let mut s = MemorySurface::new(24, 100)
            .with_script([None, Some(Key::Char('x')), None])
            .keys([Key::Char('Q')]);
        run(&mut s, &mut source, &Theme::default()).unwrap();

        assert_eq!(source.calls, 4);
        assert_eq!(s.refreshes, 4);
        let tick = Some(Duration::from_millis(DASHBOARD_TICK_MS));
        assert_eq!(s.polls, vec![tick; 4]);
    }

    #[test]
    fn renders_panels_and_gauges() {
        let mut source = FakeSource {
            snapshots: vec![full_snapshot()],
            calls: 0,
        };
        let mut s = MemorySurface::new(24, 100).keys([Key::Char('q')]);
        run(&mut s, &mut source, &Theme::default()).unwrap();

        assert!(s.contains("SYSTEM DASHBOARD"));
        assert!(s.contains("Usage: 12.5%"));
        assert!(s.contains("Hostname: box"));
        assert!(s.contains("Packets Recv: 5678"));
        assert!(s.contains(" Press 'q' to return to menu "));
        // Disk at 85% is in the high band: 34 filled cells of 40
        let disk_row = s.row_text(15);
        assert!(disk_row.contains(&format!("{}{}", "█".repeat(34), "░".repeat(6))));
        assert!(disk_row.contains("85.0%"));
    }

    #[test]
    fn bad_sample_does_not_break_the_loop() {
        let mut source = FakeSource {
            snapshots: vec![MetricsSnapshot::default()],
            calls: 0,
        };
        let mut s = MemorySurface::new(24, 100).with_script([None]).keys([Key::Char('q')]);
        run(&mut s, &mut source, &Theme::default()).unwrap();

        assert!(s.contains("Usage: n/a"));
        assert_eq!(source.calls, 2);
        // Every gauge row still shows an empty bar with the placeholder
        let empty_bar = "░".repeat(GAUGE_WIDTH as usize);
        for row in [5, 10, 15] {
            let text = s.row_text(row);
            assert!(text.contains(&format!("{}  n/a", empty_bar)), "row {}: {:?}", row, text);
        }
    }

    #[test]
    fn small_terminal_is_clipped_not_fatal() {
        let mut source = FakeSource {
            snapshots: vec![full_snapshot()],
            calls: 0,
        };
        let mut s = MemorySurface::new(6, 20).keys([Key::Char('q')]);
        run(&mut s, &mut source, &Theme::default()).unwrap();
        assert_eq!(s.refreshes, 1);
    }
}
