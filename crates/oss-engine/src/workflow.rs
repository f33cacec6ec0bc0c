// SPDX-License-Identifier: MIT

//! Workflow Engine: executes a [`WorkflowConfig`] as an ordered chain
//! (spec.md section 4.9).

use crate::custom_command::CustomCommandFetcher;
use crate::error::EngineError;
use async_trait::async_trait;
use oss_core::{Checkpoint, WorkflowConfig, WorkflowContext};

/// Injected invoker for a plain (non-custom) chain command.
#[async_trait]
pub trait ChainInvoker: Send + Sync {
    async fn invoke(&self, command: &str) -> Result<(), EngineError>;
}

/// Outcome of running a full chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStatus {
    Completed,
    Checkpoint { message: String },
    Error { error: String },
}

#[derive(Debug, Clone, Default)]
pub struct ChainReport {
    pub invoked: Vec<String>,
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
    pub status: Option<ChainStatus>,
}

/// Run every step of `config.chains_to` in order against `ctx`.
pub async fn run_chain(
    config: &WorkflowConfig,
    ctx: &WorkflowContext,
    invoker: &dyn ChainInvoker,
    fetcher: &dyn CustomCommandFetcher,
) -> ChainReport {
    let mut report = ChainReport::default();

    for step in &config.chains_to {
        let should_execute = step.always || step.condition.as_deref().is_some_and(|c| crate::conditions::evaluate(c, ctx));
        if !should_execute {
            tracing::info!(command = %step.command, "[skip]");
            report.skipped.push(step.command.clone());
            continue;
        }

        let outcome = if step.team_prefix().is_some() {
            fetcher.fetch_prompt(&step.command).await.and_then(|_prompt| Ok(()))
        } else {
            invoker.invoke(&step.command).await
        };

        match outcome {
            Ok(()) => report.invoked.push(step.command.clone()),
            Err(e) if step.team_prefix().is_some() && !step.is_blocking() => {
                report.warnings.push(format!("{}: {}", step.command, e));
                report.invoked.push(step.command.clone());
            }
            Err(e) => {
                report.status = Some(ChainStatus::Error { error: e.to_string() });
                return report;
            }
        }
    }

    report.status = Some(match config.checkpoint {
        Some(Checkpoint::Human) => ChainStatus::Checkpoint { message: "awaiting human checkpoint".to_string() },
        _ => ChainStatus::Completed,
    });
    report
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
