// SPDX-License-Identifier: MIT

//! ProcessMonitor: lists host processes and classifies long-running ones by
//! command substring (spec.md section 4.4).

use chrono::{DateTime, Duration, Utc};

/// A single row from `ps aux`-equivalent output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub command: String,
    pub started_at: DateTime<Utc>,
}

/// Closed vocabulary of classifications the hung-process policy keys off of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    Vitest,
    NpmTest,
    Jest,
    Node,
    Unknown,
}

/// Classify a process by substring match on its command line. Order matters:
/// more specific runners are checked before the generic `node` fallback.
pub fn classify(command: &str) -> ProcessKind {
    let lower = command.to_lowercase();
    if lower.contains("vitest") {
        ProcessKind::Vitest
    } else if lower.contains("npm test") || lower.contains("npm run test") {
        ProcessKind::NpmTest
    } else if lower.contains("jest") {
        ProcessKind::Jest
    } else if lower.contains("node") {
        ProcessKind::Node
    } else {
        ProcessKind::Unknown
    }
}

/// Age of a process at `now`.
pub fn age(process: &ProcessInfo, now: DateTime<Utc>) -> Duration {
    now - process.started_at
}

/// Whether a process has exceeded a given timeout.
pub fn is_process_hung(process: &ProcessInfo, timeout_ms: i64, now: DateTime<Utc>) -> bool {
    age(process, now).num_milliseconds() >= timeout_ms
}

/// Enumerates live processes matching a command substring filter. The
/// listing itself shells out (`ps aux`); bound by an internal timeout like
/// every shell-based monitor (spec.md section 5).
pub trait ProcessLister: Send + Sync {
    fn list(&self, command_filter: &str) -> Result<Vec<ProcessInfo>, crate::error::MonitorError>;
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
