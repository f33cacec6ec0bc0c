// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod agent_registry;
pub mod error;
pub mod model_router;
pub mod pr_monitor;
pub mod pr_task_executor;
pub mod webhook;

pub use agent_registry::{AgentRegistry, BackgroundAgent, RegistryEvent};
pub use error::AdapterError;
pub use model_router::{execute as execute_model_request, CanonicalRequest, CanonicalResponse, CostTracker, ExecutionOutcome};
pub use pr_monitor::{build_remediation_context, is_change_request, suggest_agent};
pub use pr_task_executor::{retry_with_escalation, run_quality_gates, RetryOutcome};
pub use webhook::{router as webhook_router, ChangesRequested, WebhookSink, WebhookState};
