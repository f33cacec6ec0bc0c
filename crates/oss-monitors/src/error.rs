// SPDX-License-Identifier: MIT

use oss_core::SupervisorError;
use thiserror::Error;

/// Observation failure inside a single monitor tick. Never propagated as a
/// crash — swallowed and recorded on the monitor's own status, surfaced as
/// its next issue if repeated (spec.md section 7).
#[derive(Debug, Error, Clone)]
pub enum MonitorError {
    #[error("shell command failed: {0}")]
    Shell(String),
    #[error("failed to parse observation: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<MonitorError> for SupervisorError {
    fn from(err: MonitorError) -> Self {
        SupervisorError::MonitorObservation(err.to_string())
    }
}
