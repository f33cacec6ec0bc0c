// SPDX-License-Identifier: MIT

//! ResourceMonitor: two-sample CPU/memory delta with threshold alerts
//! (spec.md section 4.4).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub memory_bytes: u64,
    pub cpu_time_ms: u64,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceUsage {
    pub memory_percent: f64,
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub memory_percent: f64,
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Memory,
    Cpu,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub value: f64,
    pub threshold: f64,
}

/// Compute usage from two samples taken `wall_time_ms` apart. `total_memory`
/// is the host's total memory in bytes, used to express `memory_bytes` as a
/// percentage.
pub fn usage_from_samples(before: ResourceSample, after: ResourceSample, total_memory: u64) -> ResourceUsage {
    let memory_percent = if total_memory == 0 { 0.0 } else { after.memory_bytes as f64 / total_memory as f64 * 100.0 };

    let cpu_delta_ms = after.cpu_time_ms.saturating_sub(before.cpu_time_ms) as f64;
    let wall_delta_ms = after.wall_time_ms.saturating_sub(before.wall_time_ms).max(1) as f64;
    let cpu_percent = cpu_delta_ms / wall_delta_ms * 100.0;

    ResourceUsage { memory_percent, cpu_percent }
}

/// Alerts for whatever exceeds the configured thresholds.
pub fn check_thresholds(usage: ResourceUsage, thresholds: Thresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if usage.memory_percent > thresholds.memory_percent {
        alerts.push(Alert { kind: AlertKind::Memory, value: usage.memory_percent, threshold: thresholds.memory_percent });
    }
    if usage.cpu_percent > thresholds.cpu_percent {
        alerts.push(Alert { kind: AlertKind::Cpu, value: usage.cpu_percent, threshold: thresholds.cpu_percent });
    }
    alerts
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
