// SPDX-License-Identifier: MIT

//! GitMonitor: protected-branch detection, CI/PR status parsing, and push
//! failure classification (spec.md section 4.4).

use oss_core::{AnomalyType, Issue, IssueSeverity, Priority, TaskInput};
use std::collections::HashMap;

const PROTECTED_BRANCHES: &[&str] = &["main", "master"];

/// Returns a `branch_violation` issue when `branch` is protected.
pub fn check_branch(branch: &str) -> Option<Issue> {
    if PROTECTED_BRANCHES.contains(&branch) {
        Some(Issue {
            issue_type: "branch_violation".to_string(),
            message: format!("working directly on protected branch '{branch}'"),
            severity: IssueSeverity::Error,
        })
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiStatus {
    Success,
    Failure,
    Pending,
}

#[derive(Debug, Clone)]
pub struct PrStatus {
    pub number: u64,
    pub ci: CiStatus,
    pub checks_passed: bool,
}

/// Emit `ci_failure`/`pr_check_failed` tasks for a PR's status, both at high
/// priority (spec.md section 4.4).
pub fn tasks_for_pr_status(status: &PrStatus) -> Vec<TaskInput> {
    let mut tasks = Vec::new();
    let mut context = HashMap::new();
    context.insert("pr_number".to_string(), serde_json::json!(status.number));

    if status.ci == CiStatus::Failure {
        tasks.push(TaskInput {
            priority: Priority::High,
            source: "git_monitor".to_string(),
            anomaly_type: AnomalyType::CiFailure,
            prompt: format!("CI failed for PR #{}", status.number),
            suggested_agent: None,
            context: context.clone(),
        });
    }
    if !status.checks_passed {
        tasks.push(TaskInput {
            priority: Priority::High,
            source: "git_monitor".to_string(),
            anomaly_type: AnomalyType::PrCheckFailed,
            prompt: format!("PR checks failed for PR #{}", status.number),
            suggested_agent: None,
            context,
        });
    }
    tasks
}

/// Classification of a failed `git push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushFailure {
    Rejected,
    Permission,
    Network,
    Unknown,
}

/// Classify `git push` stderr output into a failure mode.
pub fn classify_push_failure(stderr: &str) -> PushFailure {
    let lower = stderr.to_lowercase();
    if lower.contains("[rejected]") || lower.contains("non-fast-forward") {
        PushFailure::Rejected
    } else if lower.contains("permission denied") || lower.contains("403") {
        PushFailure::Permission
    } else if lower.contains("could not resolve host") || lower.contains("connection timed out") || lower.contains("network") {
        PushFailure::Network
    } else {
        PushFailure::Unknown
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
