// SPDX-License-Identifier: MIT

//! TddMonitor: flags a TDD phase that has persisted past its stale threshold
//! (spec.md section 4.4). Relies on `tdd_phase_started`, written by
//! `WorkflowState::set_tdd_phase` (DESIGN.md, Open Question resolution).

use oss_core::{Issue, IssueSeverity, WorkflowState};

pub fn check_stale_phase(state: &WorkflowState, now_ms: i64, stale_threshold_ms: i64) -> Option<Issue> {
    let phase = state.tdd_phase?;
    let started = state.tdd_phase_started?;
    if now_ms.saturating_sub(started) < stale_threshold_ms {
        return None;
    }

    Some(Issue {
        issue_type: "stale_tdd_phase".to_string(),
        message: format!("{} phase stuck for 30+ minutes", phase_name(phase).to_uppercase()),
        severity: IssueSeverity::Warning,
    })
}

fn phase_name(phase: oss_core::TddPhase) -> &'static str {
    match phase {
        oss_core::TddPhase::Red => "red",
        oss_core::TddPhase::Green => "green",
        oss_core::TddPhase::Refactor => "refactor",
    }
}

#[cfg(test)]
#[path = "tdd_tests.rs"]
mod tests;
