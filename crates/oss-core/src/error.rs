// SPDX-License-Identifier: MIT

//! Error taxonomy shared across the supervisor (spec.md section 7).
//!
//! Monitors and agents never let one of these escape into a crash: the
//! daemon tick loop and agent pollers catch, log, and record `SupervisorError`
//! on the relevant runtime status rather than propagating it further.

use thiserror::Error;

/// Abstract error taxonomy for the supervisor core.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Missing/invalid config, unknown model identifier, missing API key.
    /// Surfaced immediately; aborts the calling operation.
    #[error("config error: {0}")]
    UserConfig(String),

    /// Network, rate-limit, or CLI non-zero exit. Retried per component
    /// policy; logged and, in the model executor, triggers native fallback
    /// when exhausted.
    #[error("transient external error: {0}")]
    TransientExternal(String),

    /// Bad signature, oversized payload, unknown event. No retry, no state
    /// change; callers map this directly to an HTTP status.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Mutating a terminal task, starting a second daemon instance, pushing
    /// to a protected branch. Fails loudly; never recovered silently.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Any exception inside a monitor tick. Swallowed by the caller and
    /// recorded on the monitor's runtime status.
    #[error("monitor observation error: {0}")]
    MonitorObservation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SupervisorError {
    /// True for errors that should never be silently retried.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SupervisorError::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
