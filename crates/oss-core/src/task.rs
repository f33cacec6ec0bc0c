// SPDX-License-Identifier: MIT

//! Task: the unit of work moved through the queue (spec.md section 3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Unique, roughly time-ordered identifier for a queued task.
    pub struct TaskId("tsk-");
}

/// Closed ordinal priority: `critical` sorts before `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

crate::simple_display! {
    Priority {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

crate::simple_display! {
    TaskStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
        Failed => "failed",
    }
}

/// Closed vocabulary of anomaly types emitted by monitors (spec.md section 4.4/4.5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    AgentStuck,
    IronLawViolation,
    IronLawRepeated,
    CiFailure,
    PrCheckFailed,
    SpecDriftStructural,
    SpecDriftCriteria,
    PrRemediation,
    StaleTddPhase,
    #[serde(other)]
    Other,
}

/// Input for [`crate::queue::Queue::add`]. Everything the caller supplies;
/// `id`/`created_at`/`status`/`attempts` are assigned by the queue.
#[derive(Debug, Clone)]
pub struct TaskInput {
    pub priority: Priority,
    pub source: String,
    pub anomaly_type: AnomalyType,
    pub prompt: String,
    pub suggested_agent: Option<String>,
    pub context: HashMap<String, serde_json::Value>,
}

/// The unit of work. Immutable except for status transitions (spec.md section 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub source: String,
    pub anomaly_type: AnomalyType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_agent: Option<String>,
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when a task is evicted into the expired archive (spec.md section 8.2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_reason: Option<String>,
}

impl Task {
    pub fn new(input: TaskInput, id: TaskId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            priority: input.priority,
            created_at,
            completed_at: None,
            status: TaskStatus::Pending,
            source: input.source,
            anomaly_type: input.anomaly_type,
            prompt: input.prompt,
            suggested_agent: input.suggested_agent,
            context: input.context,
            attempts: 0,
            error: None,
            archive_reason: None,
        }
    }

    /// Ordering key used by the queue: priority ascending, then age ascending.
    pub fn order_key(&self) -> (Priority, DateTime<Utc>) {
        (self.priority, self.created_at)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A patch applied to a task by [`crate::queue::Queue::update`].
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub status: Option<TaskStatus>,
    pub error: Option<String>,
    pub increment_attempts: bool,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
