// SPDX-License-Identifier: MIT

//! LogMonitor: streams session-log lines into a bounded ring buffer, runs
//! each line through the Rule Engine, and tracks stuck-agent de-dup
//! (spec.md section 4.4).

use chrono::{DateTime, Utc};
use oss_core::{AnomalyType, Priority, TaskInput};
use oss_engine::RuleMatch;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 100;

pub struct LogMonitor {
    capacity: usize,
    buffer: VecDeque<String>,
    last_activity: Option<DateTime<Utc>>,
    stuck_reported: bool,
}

impl LogMonitor {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, buffer: VecDeque::with_capacity(capacity), last_activity: None, stuck_reported: false }
    }

    /// Ingest one line: push into the ring buffer, record activity, clear the
    /// stuck one-shot flag, and run the rule engine against it.
    pub fn ingest(&mut self, line: &str, now: DateTime<Utc>) -> Option<RuleMatch> {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line.to_string());
        self.last_activity = Some(now);
        self.stuck_reported = false;

        oss_engine::analyze(line)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(String::as_str)
    }

    /// Emit a single `agent_stuck` task per stuck window; de-duped by a
    /// one-shot flag that `ingest` resets on any new line.
    pub fn check_and_report_stuck(&mut self, timeout_seconds: i64, now: DateTime<Utc>) -> Option<TaskInput> {
        let last = self.last_activity?;
        if self.stuck_reported {
            return None;
        }
        if (now - last).num_seconds() < timeout_seconds {
            return None;
        }

        self.stuck_reported = true;
        Some(TaskInput {
            priority: Priority::Medium,
            source: "log_monitor".to_string(),
            anomaly_type: AnomalyType::AgentStuck,
            prompt: format!("No session activity for {timeout_seconds}s"),
            suggested_agent: None,
            context: Default::default(),
        })
    }
}

#[cfg(test)]
#[path = "log_monitor_tests.rs"]
mod tests;
