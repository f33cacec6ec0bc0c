// SPDX-License-Identifier: MIT

use oss_core::SupervisorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("agent initialization failed: {0}")]
    AgentInit(String),
    #[error("agent poll failed: {0}")]
    AgentPoll(String),
    #[error("subprocess failed: {0}")]
    Subprocess(String),
    #[error("invalid shell argument: {0}")]
    InvalidArgument(String),
    #[error("network request failed: {0}")]
    Network(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<AdapterError> for SupervisorError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::InvalidArgument(msg) => SupervisorError::InvariantViolation(msg),
            AdapterError::Network(msg) | AdapterError::Subprocess(msg) => SupervisorError::TransientExternal(msg),
            other => SupervisorError::MonitorObservation(other.to_string()),
        }
    }
}
