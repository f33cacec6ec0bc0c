// SPDX-License-Identifier: MIT

use oss_core::SupervisorError;
use thiserror::Error;

/// Engine-local errors that convert into the shared taxonomy at the daemon
/// boundary (spec.md section 7).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("custom command fetch failed: {0}")]
    CustomCommandFetch(String),
    #[error("chain invoker failed: {0}")]
    Invoker(String),
}

impl From<EngineError> for SupervisorError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::CustomCommandFetch(msg) => SupervisorError::TransientExternal(msg),
            EngineError::Invoker(msg) => SupervisorError::Protocol(msg),
        }
    }
}
