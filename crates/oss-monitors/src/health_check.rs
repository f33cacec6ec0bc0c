// SPDX-License-Identifier: MIT

//! HealthCheckScheduler: runs a configurable shell command on an interval and
//! records a one-line append-only log (spec.md section 4.4, `health-check.log`).

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub output: String,
    pub error: Option<String>,
}

/// Runs the configured command. Implementations shell out; fakes let tests
/// control the outcome.
pub trait HealthCheckRunner: Send + Sync {
    fn run(&self) -> Result<(String, u64), crate::error::MonitorError>;
}

pub struct HealthCheckScheduler<R: HealthCheckRunner> {
    runner: R,
    last: Mutex<Option<HealthCheckResult>>,
}

impl<R: HealthCheckRunner> HealthCheckScheduler<R> {
    pub fn new(runner: R) -> Self {
        Self { runner, last: Mutex::new(None) }
    }

    /// Run the command once, record the result, and return it along with a
    /// four-line log record matching `health-check.log`'s shape.
    pub fn tick(&self, now: DateTime<Utc>) -> (HealthCheckResult, String) {
        let result = match self.runner.run() {
            Ok((output, duration_ms)) => {
                HealthCheckResult { success: true, timestamp: now, duration_ms, output, error: None }
            }
            Err(e) => HealthCheckResult { success: false, timestamp: now, duration_ms: 0, output: String::new(), error: Some(e.to_string()) },
        };

        let log_record = format!(
            "timestamp={}\nsuccess={}\nduration_ms={}\n{}\n",
            result.timestamp.to_rfc3339(),
            result.success,
            result.duration_ms,
            result.error.as_deref().unwrap_or(&result.output),
        );

        *self.last.lock() = Some(result.clone());
        (result, log_record)
    }

    pub fn last_result(&self) -> Option<HealthCheckResult> {
        self.last.lock().clone()
    }
}

#[cfg(test)]
#[path = "health_check_tests.rs"]
mod tests;
