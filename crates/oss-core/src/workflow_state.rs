// SPDX-License-Identifier: MIT

//! Public session-state document (spec.md section 3, "WorkflowState").
//!
//! Read by the status-line renderer and the AI session. Mutators apply
//! read-modify-write on the persisted document (persistence lives in
//! `oss-storage`); this module only defines the shape and the pure mutator
//! functions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorMode {
    Watching,
    Intervening,
    Idle,
}

crate::simple_display! {
    SupervisorMode {
        Watching => "watching",
        Intervening => "intervening",
        Idle => "idle",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TddPhase {
    Red,
    Green,
    Refactor,
}

crate::simple_display! {
    TddPhase {
        Red => "red",
        Green => "green",
        Refactor => "refactor",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

impl IssueSeverity {
    /// Ordinal used for the daemon's "highest severity first" tie-break
    /// (spec.md section 4.3, "Issue prioritization rule").
    pub fn rank(self) -> u8 {
        match self {
            IssueSeverity::Error => 0,
            IssueSeverity::Warning => 1,
            IssueSeverity::Info => 2,
        }
    }
}

crate::simple_display! {
    IssueSeverity {
        Info => "info",
        Warning => "warning",
        Error => "error",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub message: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAgent {
    #[serde(rename = "type")]
    pub agent_type: String,
    pub task: String,
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Public document read by the status line and AI session (spec.md section 3).
///
/// Unknown/extension keys round-trip through `extra` so external consumers
/// that add their own fields never get clobbered by a write from this process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<SupervisorMode>,
    #[serde(rename = "activeStep", default, skip_serializing_if = "Option::is_none")]
    pub active_step: Option<String>,
    #[serde(rename = "tddPhase", default, skip_serializing_if = "Option::is_none")]
    pub tdd_phase: Option<TddPhase>,
    /// Epoch milliseconds when `tddPhase` last changed. Written whenever
    /// `set_tdd_phase` runs so `TddMonitor` can detect staleness (spec.md
    /// section 9, "Open questions" — this field is written here, resolving
    /// the open question in DESIGN.md).
    #[serde(rename = "tddPhaseStarted", default, skip_serializing_if = "Option::is_none")]
    pub tdd_phase_started: Option<i64>,
    #[serde(rename = "activeAgent", default, skip_serializing_if = "Option::is_none")]
    pub active_agent: Option<ActiveAgent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
    #[serde(rename = "daemonHeartbeat", default, skip_serializing_if = "Option::is_none")]
    pub daemon_heartbeat: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl WorkflowState {
    pub fn set_supervisor(&mut self, mode: SupervisorMode) {
        self.supervisor = Some(mode);
    }

    pub fn set_active_step(&mut self, step: impl Into<String>) {
        self.active_step = Some(step.into());
    }

    pub fn set_tdd_phase(&mut self, phase: TddPhase, now_ms: i64) {
        self.tdd_phase = Some(phase);
        self.tdd_phase_started = Some(now_ms);
    }

    pub fn set_active_agent(&mut self, agent: ActiveAgent) {
        self.active_agent = Some(agent);
    }

    pub fn clear_active_agent(&mut self) {
        self.active_agent = None;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Preserves all unrelated keys (spec.md section 4.2).
    pub fn report_issue(&mut self, issue: Issue) {
        self.issue = Some(issue);
    }

    pub fn clear_issue(&mut self) {
        self.issue = None;
    }

    pub fn set_daemon_heartbeat(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.daemon_heartbeat = Some(now);
    }
}

/// Select the issue to publish to the state document (spec.md section 4.3 and 8.6):
/// highest severity first (error > warning > info); ties preserve first-in order.
pub fn prioritize_issues(issues: Vec<Issue>) -> Option<Issue> {
    issues.into_iter().min_by_key(|i| i.severity.rank())
}

#[cfg(test)]
#[path = "workflow_state_tests.rs"]
mod tests;
