// SPDX-License-Identifier: MIT

//! Agent spawner: runs an agent list sequentially or in parallel, returning
//! every result regardless of individual failure (spec.md section 4.9).

use crate::error::EngineError;
use async_trait::async_trait;
use futures_util::future::join_all;
use oss_core::AgentStep;

#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, agent: &str) -> Result<(), EngineError>;
}

#[derive(Debug, Clone)]
pub struct AgentRunResult {
    pub agent: String,
    pub outcome: Result<(), String>,
}

pub async fn run_parallel(steps: &[AgentStep], runner: &dyn AgentRunner) -> Vec<AgentRunResult> {
    let futures = steps.iter().map(|step| async move {
        AgentRunResult { agent: step.agent.clone(), outcome: runner.run(&step.agent).await.map_err(|e| e.to_string()) }
    });
    join_all(futures).await
}

pub async fn run_sequential(steps: &[AgentStep], runner: &dyn AgentRunner) -> Vec<AgentRunResult> {
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = runner.run(&step.agent).await.map_err(|e| e.to_string());
        results.push(AgentRunResult { agent: step.agent.clone(), outcome });
    }
    results
}

#[cfg(test)]
#[path = "agent_spawner_tests.rs"]
mod tests;
