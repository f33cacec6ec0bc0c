// SPDX-License-Identifier: MIT

//! Intervention Generator: maps a confidence-scored issue to a response
//! (spec.md section 4.5).

use oss_core::{AnomalyType, Priority, TaskInput};
use std::collections::HashMap;

/// An observation from a monitor awaiting a routing decision.
#[derive(Debug, Clone)]
pub struct WorkflowIssue {
    pub confidence: f64,
    pub anomaly_type: AnomalyType,
    pub title: String,
    pub message: String,
    pub suggested_agent: Option<String>,
    pub context: HashMap<String, serde_json::Value>,
}

/// The generator's decision for a given issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// High-priority auto-executing queue task; confidence > 0.9.
    AutoRemediate(TaskInputSummary),
    /// Medium-priority non-auto task plus a notification; 0.7 <= confidence <= 0.9.
    NotifySuggest(TaskInputSummary),
    /// Notification only, no queue task; confidence < 0.7.
    NotifyOnly { title: String, message: String },
}

/// The queue-task half of a response, kept separate from `oss_core::Task` so
/// callers decide when (and whether) to actually enqueue it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInputSummary {
    pub title: String,
    pub message: String,
    pub input: TaskInputData,
}

/// Plain-data mirror of [`oss_core::TaskInput`] (which is not `PartialEq`).
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInputData {
    pub priority: Priority,
    pub anomaly_type: AnomalyType,
    pub prompt: String,
    pub suggested_agent: Option<String>,
}

impl TaskInputData {
    pub fn into_task_input(self, source: &str, context: HashMap<String, serde_json::Value>) -> TaskInput {
        TaskInput {
            priority: self.priority,
            source: source.to_string(),
            anomaly_type: self.anomaly_type,
            prompt: self.prompt,
            suggested_agent: self.suggested_agent,
            context,
        }
    }
}

/// Route a [`WorkflowIssue`] to a [`Response`] per the confidence bands in
/// spec.md section 4.5.
pub fn generate(issue: &WorkflowIssue) -> Response {
    let summary = TaskInputSummary {
        title: issue.title.clone(),
        message: issue.message.clone(),
        input: TaskInputData {
            priority: Priority::Medium,
            anomaly_type: issue.anomaly_type.clone(),
            prompt: issue.message.clone(),
            suggested_agent: issue.suggested_agent.clone(),
        },
    };

    if issue.confidence > 0.9 {
        let mut summary = summary;
        summary.input.priority = Priority::High;
        Response::AutoRemediate(summary)
    } else if issue.confidence >= 0.7 {
        Response::NotifySuggest(summary)
    } else {
        Response::NotifyOnly { title: issue.title.clone(), message: issue.message.clone() }
    }
}

#[cfg(test)]
#[path = "intervention_tests.rs"]
mod tests;
