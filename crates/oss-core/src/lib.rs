// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oss-core: shared data model and pure logic for the supervisor daemon.
//!
//! Holds the types described in spec.md section 3 plus the error taxonomy
//! (section 7) and model-id / config resolution used across the workspace.

pub mod macros;

pub mod agent;
pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod model_id;
pub mod queue;
pub mod task;
pub mod time_fmt;
pub mod workflow_config;
pub mod workflow_state;

pub use agent::{
    AgentConfig, AgentHealthEvent, AgentMetadata, AgentStatus, PrMonitorState,
    PrRemediationContext, ProcessedComment, SuggestedAgent, UNHEALTHY_THRESHOLD,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{resolve_model_id, ModelIdSources, Paths};
pub use error::{Result, SupervisorError};
pub use id::{short, IdBuf};
pub use model_id::{is_valid_model_id, parse_model_id, ParsedModelId, Provider};
pub use queue::{Queue, QueueDocument, QueueEvent, DEFAULT_MAX_SIZE};
pub use task::{AnomalyType, Priority, Task, TaskId, TaskInput, TaskPatch, TaskStatus};
pub use workflow_config::{
    AgentStep, ChainStep, Checkpoint, QualityGates, TddLoopPhase, TestResult, WorkflowConfig,
    WorkflowContext,
};
pub use workflow_state::{
    prioritize_issues, ActiveAgent, Issue, IssueSeverity, SupervisorMode, TddPhase, WorkflowState,
};
