// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rule engine, intervention generator, and workflow engine (spec.md sections
//! 4.5 and 4.9).

pub mod agent_spawner;
pub mod conditions;
pub mod custom_command;
pub mod error;
pub mod intervention;
pub mod rule_engine;
pub mod workflow;

pub use agent_spawner::{AgentRunResult, AgentRunner};
pub use custom_command::{CustomCommandFetcher, HttpCustomCommandFetcher};
pub use error::EngineError;
pub use intervention::{generate as generate_intervention, Response, WorkflowIssue};
pub use rule_engine::{analyze, RuleMatch};
pub use workflow::{run_chain, ChainInvoker, ChainReport, ChainStatus};
