// SPDX-License-Identifier: MIT

//! IronLawMonitor: scans for `❌ LAW #N:` / `✅ LAW #N:` markers and escalates
//! repeated violations per law (spec.md section 4.4 and property 9).

use oss_core::{AnomalyType, Priority, TaskInput};
use std::collections::HashMap;

const CORRECTIVE_HINT: &str =
    "Review the iron-law requirement and apply the corrective action before proceeding.";

#[derive(Debug, Default)]
pub struct IronLawMonitor {
    /// Per-law violation counter, keyed by law number.
    counters: HashMap<u32, u32>,
}

impl IronLawMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation of `law`. First violation emits nothing; second
    /// emits one low-priority task; third and beyond emit one high-priority
    /// task with a corrective hint.
    pub fn record_violation(&mut self, law: u32, message: &str) -> Option<TaskInput> {
        let count = self.counters.entry(law).or_insert(0);
        *count += 1;

        let mut context = HashMap::new();
        context.insert("law".to_string(), serde_json::json!(law));

        match *count {
            1 => None,
            2 => Some(TaskInput {
                priority: Priority::Low,
                source: "iron_law_monitor".to_string(),
                anomaly_type: AnomalyType::IronLawViolation,
                prompt: format!("Iron law #{law} violated twice: {message}"),
                suggested_agent: None,
                context,
            }),
            _ => {
                context.insert("hint".to_string(), serde_json::json!(CORRECTIVE_HINT));
                Some(TaskInput {
                    priority: Priority::High,
                    source: "iron_law_monitor".to_string(),
                    anomaly_type: AnomalyType::IronLawRepeated,
                    prompt: format!("Iron law #{law} repeatedly violated: {message}"),
                    suggested_agent: None,
                    context,
                })
            }
        }
    }

    /// Record a pass for `law`, clearing its counter.
    pub fn record_pass(&mut self, law: u32) {
        self.counters.remove(&law);
    }

    pub fn violation_count(&self, law: u32) -> u32 {
        self.counters.get(&law).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "iron_law_tests.rs"]
mod tests;
