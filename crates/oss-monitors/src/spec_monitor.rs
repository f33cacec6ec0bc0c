// SPDX-License-Identifier: MIT

//! SpecMonitor: parses a spec document's sections and detects drift against
//! implementation files and test files (spec.md section 4.4).

use oss_core::{AnomalyType, Priority, TaskInput};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Checked,
    Unchecked,
}

#[derive(Debug, Clone)]
pub struct SpecItem {
    pub id: String,
    pub description: String,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SpecSection {
    pub items: Vec<SpecItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedSpec {
    pub components: SpecSection,
    pub criteria: SpecSection,
    pub behaviors: SpecSection,
}

/// Implemented/total coverage for one section (property 11).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub implemented: usize,
    pub total: usize,
}

impl Coverage {
    /// `implemented/total` when `total>0`, else `1.0` (a section with no
    /// items is vacuously fully covered).
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.implemented as f64 / self.total as f64
        }
    }
}

pub fn section_coverage(section: &SpecSection) -> Coverage {
    let total = section.items.len();
    let implemented = section.items.iter().filter(|i| i.status == ItemStatus::Checked).count();
    Coverage { implemented, total }
}

/// Structural missing: a component id with no implementation file match.
pub fn structural_missing(section: &SpecSection, implementation_files: &[String]) -> Vec<TaskInput> {
    section
        .items
        .iter()
        .filter(|item| !implementation_files.iter().any(|f| f.contains(&item.id)))
        .map(|item| drift_task(AnomalyType::SpecDriftStructural, &format!("missing implementation for '{}'", item.id), None))
        .collect()
}

/// Structural extra: an implementation file with no corresponding spec item.
pub fn structural_extra(section: &SpecSection, implementation_files: &[String]) -> Vec<TaskInput> {
    implementation_files
        .iter()
        .filter(|file| !section.items.iter().any(|item| file.contains(&item.id)))
        .map(|file| drift_task(AnomalyType::SpecDriftStructural, &format!("'{file}' has no corresponding spec item"), Some(file.clone())))
        .collect()
}

/// Criteria incomplete: an unchecked criterion whose id does not appear in
/// any test file. Already-checked criteria are excluded from the search.
pub fn criteria_incomplete(section: &SpecSection, test_files: &[(String, String)]) -> Vec<TaskInput> {
    section
        .items
        .iter()
        .filter(|item| item.status == ItemStatus::Unchecked)
        .filter(|item| !test_files.iter().any(|(_, contents)| contents.contains(&item.id)))
        .map(|item| {
            let mut task = drift_task(
                AnomalyType::SpecDriftCriteria,
                &format!("criterion '{}' not covered by any test", item.id),
                None,
            );
            task.priority = Priority::Medium;
            task
        })
        .collect()
}

fn drift_task(anomaly_type: AnomalyType, message: &str, file: Option<String>) -> TaskInput {
    let mut context = HashMap::new();
    if let Some(file) = file {
        context.insert("file".to_string(), serde_json::json!(file));
    }
    TaskInput {
        priority: Priority::High,
        source: "spec_monitor".to_string(),
        anomaly_type,
        prompt: message.to_string(),
        suggested_agent: None,
        context,
    }
}

#[cfg(test)]
#[path = "spec_monitor_tests.rs"]
mod tests;
