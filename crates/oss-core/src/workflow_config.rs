// SPDX-License-Identifier: MIT

//! Declarative workflow configuration (spec.md section 3, "WorkflowConfig (declarative)").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    pub command: String,
    #[serde(default)]
    pub always: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Whether a failing custom-command step stops the chain. Unspecified in
    /// the source API contract; resolved to `true` when absent (DESIGN.md).
    #[serde(default, rename = "is_blocking", skip_serializing_if = "Option::is_none")]
    pub is_blocking: Option<bool>,
}

impl ChainStep {
    /// Resolved blocking behavior: defaults to `true` when unspecified.
    pub fn is_blocking(&self) -> bool {
        self.is_blocking.unwrap_or(true)
    }

    /// A command addressed to a team's custom-command registry, e.g.
    /// `"@platform-team/deploy-check"`.
    pub fn team_prefix(&self) -> Option<&str> {
        self.command.strip_prefix('@').map(|_| self.command.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TddLoopPhase {
    Red,
    Green,
    Refactor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    pub agent: String,
    #[serde(default)]
    pub always: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityGates {
    pub parallel: bool,
    pub agents: Vec<String>,
    pub all_must_pass: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    Human,
    Auto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default, rename = "chains_to")]
    pub chains_to: Vec<ChainStep>,
    #[serde(default, rename = "task_loop", skip_serializing_if = "Option::is_none")]
    pub task_loop: Option<Vec<TddLoopPhase>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<AgentStep>>,
    #[serde(default, rename = "quality_gates", skip_serializing_if = "Option::is_none")]
    pub quality_gates: Option<QualityGates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<Checkpoint>,
}

/// Context evaluated against named conditions (spec.md section 4.9, "Built-in
/// conditions").
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    pub design_content: Option<String>,
    pub changed_files: Vec<String>,
    pub last_test_result: Option<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed,
}

#[cfg(test)]
#[path = "workflow_config_tests.rs"]
mod tests;
