// SPDX-License-Identifier: MIT

//! TestMonitor: tracks per-feature test-runner results and emits a task when
//! a feature regresses (spec.md section 4.4).

use oss_core::{AnomalyType, Priority, TaskInput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunResult {
    pub passed: u32,
    pub failed: u32,
}

/// Per-feature persisted testing state (`testing.json`-shaped document).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureTestingDocument {
    pub last_result: Option<TestRunResult>,
}

/// Update `doc` with `result` for `feature`, returning a regression task when
/// the failure count rose since the last recorded run.
pub fn record_run(feature: &str, doc: &mut FeatureTestingDocument, result: TestRunResult) -> Option<TaskInput> {
    let regressed = doc.last_result.is_some_and(|prev| result.failed > prev.failed);
    doc.last_result = Some(result);

    if !regressed {
        return None;
    }

    let mut context = HashMap::new();
    context.insert("feature".to_string(), serde_json::json!(feature));
    context.insert("failed".to_string(), serde_json::json!(result.failed));

    Some(TaskInput {
        priority: Priority::High,
        source: "test_monitor".to_string(),
        anomaly_type: AnomalyType::Other,
        prompt: format!("Test regression in '{feature}': {} failing", result.failed),
        suggested_agent: None,
        context,
    })
}

#[cfg(test)]
#[path = "test_monitor_tests.rs"]
mod tests;
