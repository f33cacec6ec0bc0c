use super::*;

fn issue(severity: IssueSeverity, tag: &str) -> Issue {
    Issue { issue_type: tag.to_string(), message: tag.to_string(), severity }
}

/// E3: state starts empty; after setting tdd phase, active agent, and an
/// issue, all three survive a read-write cycle (serde round-trip here).
#[test]
fn e3_mutators_compose_and_round_trip() {
    let mut state = WorkflowState::default();
    state.set_tdd_phase(TddPhase::Red, 1_000);
    state.set_active_agent(ActiveAgent {
        agent_type: "test-engineer".into(),
        task: "login".into(),
        started_at: chrono::Utc::now(),
    });
    state.report_issue(issue(IssueSeverity::Warning, "stale_tdd_phase"));

    let json = serde_json::to_string(&state).unwrap();
    let back: WorkflowState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tdd_phase, Some(TddPhase::Red));
    assert_eq!(back.tdd_phase_started, Some(1_000));
    assert!(back.active_agent.is_some());
    assert!(back.issue.is_some());
}

#[test]
fn report_issue_preserves_unrelated_keys() {
    let mut state = WorkflowState::default();
    state.set_message("hello");
    state.report_issue(issue(IssueSeverity::Error, "x"));
    assert_eq!(state.message.as_deref(), Some("hello"));
}

/// Property 6: prioritize_issues([info, warning, error]) returns the error;
/// prioritize_issues([]) returns null; ties preserve first-in order.
#[test]
fn prioritize_issues_picks_highest_severity() {
    let issues = vec![
        issue(IssueSeverity::Info, "i"),
        issue(IssueSeverity::Warning, "w"),
        issue(IssueSeverity::Error, "e"),
    ];
    let winner = prioritize_issues(issues).unwrap();
    assert_eq!(winner.issue_type, "e");
}

#[test]
fn prioritize_issues_empty_is_none() {
    assert!(prioritize_issues(Vec::new()).is_none());
}

#[test]
fn prioritize_issues_ties_keep_first() {
    let issues = vec![issue(IssueSeverity::Warning, "first"), issue(IssueSeverity::Warning, "second")];
    let winner = prioritize_issues(issues).unwrap();
    assert_eq!(winner.issue_type, "first");
}
