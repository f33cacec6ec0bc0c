// SPDX-License-Identifier: MIT

//! HungProcessKiller: decides whether a classified process should be killed
//! and carries out the kill with a grace period (spec.md section 4.4).

use crate::process::{is_process_hung, ProcessInfo, ProcessKind};
use chrono::{DateTime, Utc};

/// Per-kind timeouts, in milliseconds.
pub fn default_timeout_ms(kind: ProcessKind) -> i64 {
    match kind {
        ProcessKind::Vitest => 5 * 60 * 1000,
        ProcessKind::NpmTest | ProcessKind::Jest => 10 * 60 * 1000,
        ProcessKind::Node => 15 * 60 * 1000,
        ProcessKind::Unknown => 30 * 60 * 1000,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillDecision {
    pub success: bool,
    pub dry_run: bool,
    pub pid: u32,
    pub kind: ProcessKind,
    pub reason: &'static str,
}

/// Pure decision: should this process be killed right now.
pub fn should_kill_process(process: &ProcessInfo, kind: ProcessKind, now: DateTime<Utc>) -> bool {
    is_process_hung(process, default_timeout_ms(kind), now)
}

/// Abstraction over sending signals to a PID, so the kill path is testable
/// without touching real processes.
pub trait ProcessKiller: Send + Sync {
    fn terminate(&self, pid: u32) -> Result<(), crate::error::MonitorError>;
    fn kill(&self, pid: u32) -> Result<(), crate::error::MonitorError>;
}

/// Evaluate and, unless `dry_run`, carry out the kill (SIGTERM then SIGKILL
/// after a grace period handled by the caller's scheduler).
pub fn decide_and_kill(
    process: &ProcessInfo,
    kind: ProcessKind,
    now: DateTime<Utc>,
    dry_run: bool,
    killer: &dyn ProcessKiller,
) -> KillDecision {
    let hung = should_kill_process(process, kind, now);
    if !hung {
        return KillDecision { success: false, dry_run, pid: process.pid, kind, reason: "not hung" };
    }

    tracing::info!(
        pid = process.pid,
        kind = ?kind,
        dry_run,
        "killing hung process: exceeded timeout"
    );

    if dry_run {
        return KillDecision { success: true, dry_run: true, pid: process.pid, kind, reason: "exceeded timeout" };
    }

    let success = killer.terminate(process.pid).is_ok();
    KillDecision { success, dry_run: false, pid: process.pid, kind, reason: "exceeded timeout" }
}

#[cfg(test)]
#[path = "hung_process_tests.rs"]
mod tests;
