// SPDX-License-Identifier: MIT

//! Agent registry data model (spec.md section 3 and 4.6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static, never-changes-at-runtime agent description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Runtime status tracked by the registry, outside the agent implementation
/// itself (spec.md section 4.6 and 9, "Pluggable agents with uniform lifecycle").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub is_running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_poll_time: Option<DateTime<Utc>>,
    pub error_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Unhealthy threshold: consecutive poll failures before `agent:unhealthy`
/// fires (spec.md section 4.6).
pub const UNHEALTHY_THRESHOLD: u32 = 3;

/// Persisted per-agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub max_retries: u32,
    pub retry_on_failure: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { enabled: true, interval_ms: 60_000, max_retries: 3, retry_on_failure: true }
    }
}

/// Health transition emitted by the registry when an agent's run crosses the
/// unhealthy threshold or recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentHealthEvent {
    Healthy,
    Unhealthy,
}

/// A single processed PR review comment, tracked for TTL cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedComment {
    pub comment_id: String,
    pub processed_at: DateTime<Utc>,
}

/// TTL for processed-comment records (spec.md section 3, "PRMonitorState").
pub const PR_COMMENT_TTL_DAYS: i64 = 30;

/// Persistent state for the PR-review monitor agent (spec.md sections 3 and 4.6.1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrMonitorState {
    pub processed: Vec<ProcessedComment>,
    pub comments_processed: u64,
    pub tasks_queued: u64,
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_poll_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl PrMonitorState {
    pub fn has_processed(&self, comment_id: &str) -> bool {
        self.processed.iter().any(|c| c.comment_id == comment_id)
    }

    pub fn mark_processed(&mut self, comment_id: impl Into<String>, now: DateTime<Utc>) {
        self.processed.push(ProcessedComment { comment_id: comment_id.into(), processed_at: now });
        self.comments_processed += 1;
    }

    /// Drop processed-comment records older than [`PR_COMMENT_TTL_DAYS`].
    /// Called on load and on save (spec.md section 4.6.1).
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) {
        let cutoff = now - chrono::Duration::days(PR_COMMENT_TTL_DAYS);
        self.processed.retain(|c| c.processed_at > cutoff);
    }
}

/// Heuristic suggested-agent buckets for PR remediation (spec.md section 4.6.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestedAgent {
    Typescript,
    Testing,
    Performance,
    Security,
    Refactor,
    Debugger,
}

crate::simple_display! {
    SuggestedAgent {
        Typescript => "typescript",
        Testing => "testing",
        Performance => "performance",
        Security => "security",
        Refactor => "refactor",
        Debugger => "debugger",
    }
}

/// A queued PR-remediation task payload (spec.md section 4.6.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrRemediationContext {
    pub pr_number: u64,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub comment_id: String,
    pub comment_body: String,
    pub suggested_agent: String,
}

impl PrRemediationContext {
    pub fn to_context_map(&self) -> HashMap<String, serde_json::Value> {
        let value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
