// SPDX-License-Identifier: MIT

//! PR Task Executor (reference consumer): validation helpers and the quality
//! gate / retry state machine that consumes a queued PR-remediation task
//! (spec.md section 4.6.2 and 9, "Shell-argument safety").

use crate::error::AdapterError;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::io::Write;

const MAX_PR_NUMBER: u64 = 1_000_000_000;

/// PR numbers must be positive integers <= 1e9.
pub fn validate_pr_number(n: u64) -> Result<(), AdapterError> {
    if n == 0 || n > MAX_PR_NUMBER {
        return Err(AdapterError::InvalidArgument(format!("pr number {n} out of range")));
    }
    Ok(())
}

/// Comment ids must match `[A-Za-z0-9_-]+`.
pub fn validate_comment_id(id: &str) -> Result<(), AdapterError> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
        Ok(())
    } else {
        Err(AdapterError::InvalidArgument(format!("invalid comment id '{id}'")))
    }
}

/// Branch names: no leading/trailing slash or dot, no double dot.
pub fn validate_branch_name(name: &str) -> Result<(), AdapterError> {
    let invalid = name.is_empty()
        || name.starts_with('/')
        || name.ends_with('/')
        || name.starts_with('.')
        || name.ends_with('.')
        || name.contains("..")
        || name.contains(' ')
        || name == "main"
        || name == "master";
    if invalid {
        Err(AdapterError::InvalidArgument(format!("invalid or protected branch name '{name}'")))
    } else {
        Ok(())
    }
}

/// Writes `message` to a fresh temp file and returns its path. Commit
/// messages must never be inlined into a shell string (spec.md section 9).
pub fn write_commit_message_file(message: &str) -> Result<std::path::PathBuf, AdapterError> {
    let mut file = tempfile::NamedTempFile::new().map_err(AdapterError::Io)?;
    file.write_all(message.as_bytes()).map_err(AdapterError::Io)?;
    let (_file, path) = file.keep().map_err(|e| AdapterError::Io(e.error))?;
    Ok(path)
}

/// A single quality gate (tests, type check, lint, ...).
#[async_trait]
pub trait QualityGate: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<(), String>;
}

#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub name: String,
    pub passed: bool,
    pub error: Option<String>,
}

/// Run every gate in parallel, regardless of individual failure.
pub async fn run_quality_gates(gates: &[Box<dyn QualityGate>]) -> Vec<GateOutcome> {
    join_all(gates.iter().map(|gate| async move {
        match gate.run().await {
            Ok(()) => GateOutcome { name: gate.name().to_string(), passed: true, error: None },
            Err(e) => GateOutcome { name: gate.name().to_string(), passed: false, error: Some(e) },
        }
    }))
    .await
}

/// Outer-operation retry policy: a permanent failure skips remaining
/// retries; exhaustion sets a needs-escalation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOutcome {
    pub attempts_used: u32,
    pub needs_escalation: bool,
}

/// Drive `attempt` up to `max_retries` times. `attempt` returns `Ok(())` on
/// success, or `Err((message, permanent))` — a permanent failure aborts the
/// retry loop immediately.
pub async fn retry_with_escalation<F, Fut>(max_retries: u32, mut attempt: F) -> RetryOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<(), (String, bool)>>,
{
    for n in 1..=max_retries {
        match attempt(n).await {
            Ok(()) => return RetryOutcome { attempts_used: n, needs_escalation: false },
            Err((_, true)) => return RetryOutcome { attempts_used: n, needs_escalation: true },
            Err((_, false)) => continue,
        }
    }
    RetryOutcome { attempts_used: max_retries, needs_escalation: true }
}

#[cfg(test)]
#[path = "pr_task_executor_tests.rs"]
mod tests;
