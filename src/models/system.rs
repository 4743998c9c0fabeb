/// One sample of host metrics, taken once per dashboard tick.
///
/// Every field is optional: a source that cannot read something leaves it
/// `None` and the dashboard shows a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu_percent: Option<f32>,
    pub memory: Option<UsageStats>,
    pub disk: Option<UsageStats>,
    pub network: Option<NetworkCounters>,
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub os_release: Option<String>,
    /// Seconds since the Unix epoch.
    pub boot_time: Option<u64>,
}

/// Capacity usage of memory or a filesystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f32,
}

impl UsageStats {
    /// Build from totals, rounding the percentage to one decimal.
    /// A zero total yields `None`.
    pub fn from_bytes(total_bytes: u64, used_bytes: u64) -> Option<Self> {
        if total_bytes == 0 {
            return None;
        }
        let percent = used_bytes as f64 / total_bytes as f64 * 100.0;
        Some(Self {
            total_bytes,
            used_bytes,
            percent: round_tenth(percent as f32),
        })
    }
}

/// Network counters since boot, summed over interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Round to one decimal place.
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_from_bytes() {
        let u = UsageStats::from_bytes(1000, 250).unwrap();
        assert_eq!(u.total_bytes, 1000);
        assert_eq!(u.used_bytes, 250);
        assert_eq!(u.percent, 25.0);
    }

    #[test]
    fn usage_rounds_to_tenth() {
        let u = UsageStats::from_bytes(3, 1).unwrap();
        assert_eq!(u.percent, 33.3);
    }

    #[test]
    fn usage_zero_total_is_unavailable() {
        assert_eq!(UsageStats::from_bytes(0, 0), None);
    }

    #[test]
    fn default_snapshot_is_all_unavailable() {
        let s = MetricsSnapshot::default();
        assert!(s.cpu_percent.is_none());
        assert!(s.memory.is_none());
        assert!(s.boot_time.is_none());
    }
}
