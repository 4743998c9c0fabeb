use std::path::{Path, PathBuf};

use sysinfo::{Disks, Networks, System};

use crate::constants::*;
use crate::models::{round_tenth, MetricsSnapshot, NetworkCounters, UsageStats};

/// Anything that can produce a metrics snapshot on demand.
///
/// Implementations degrade missing readings to `None` instead of failing.
pub trait MetricsSource {
    fn sample(&mut self) -> MetricsSnapshot;
}

/// Responsible for collecting host metrics via sysinfo.
/// Single Responsibility: only gathers data, no formatting.
pub struct SystemCollector {
    sys: System,
    networks: Networks,
    disks: Disks,
    /// Mount point whose usage is reported as "the" disk.
    disk_mount: PathBuf,
}

impl SystemCollector {
    pub fn new(disk_mount: impl Into<PathBuf>) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        // CPU usage is a delta between two refreshes
        std::thread::sleep(std::time::Duration::from_millis(INITIAL_SETTLE_MS));
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        Self {
            sys,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            disk_mount: disk_mount.into(),
        }
    }

    fn disk_usage(&self) -> Option<UsageStats> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new(&self.disk_mount))?;
        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        UsageStats::from_bytes(total, used)
    }

    fn network_counters(&self) -> Option<NetworkCounters> {
        if self.networks.iter().next().is_none() {
            return None;
        }
        Some(self.networks.iter().fold(
            NetworkCounters::default(),
            |acc, (_, data)| NetworkCounters {
                bytes_sent: acc.bytes_sent + data.total_transmitted(),
                bytes_recv: acc.bytes_recv + data.total_received(),
                packets_sent: acc.packets_sent + data.total_packets_transmitted(),
                packets_recv: acc.packets_recv + data.total_packets_received(),
            },
        ))
    }
}

impl MetricsSource for SystemCollector {
    fn sample(&mut self) -> MetricsSnapshot {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.networks.refresh();
        self.disks.refresh();

        let cpu = self.sys.global_cpu_usage();
        let boot_time = System::boot_time();

        let snapshot = MetricsSnapshot {
            cpu_percent: cpu.is_finite().then(|| round_tenth(cpu)),
            memory: UsageStats::from_bytes(self.sys.total_memory(), self.sys.used_memory()),
            disk: self.disk_usage(),
            network: self.network_counters(),
            hostname: System::host_name(),
            os_name: System::name(),
            os_release: System::kernel_version(),
            boot_time: (boot_time > 0).then_some(boot_time),
        };

        if snapshot.disk.is_none() {
            log::debug!("no disk mounted at {}", self.disk_mount.display());
        }
        snapshot
    }
}
