use super::*;

#[test]
fn protected_branch_is_an_error_issue() {
    let issue = check_branch("main").unwrap();
    assert_eq!(issue.severity, IssueSeverity::Error);
    assert_eq!(issue.issue_type, "branch_violation");
    assert!(check_branch("feat/x").is_none());
}

#[test]
fn failed_ci_and_checks_each_emit_a_high_priority_task() {
    let status = PrStatus { number: 42, ci: CiStatus::Failure, checks_passed: false };
    let tasks = tasks_for_pr_status(&status);
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.priority == Priority::High));
    assert_eq!(tasks[0].anomaly_type, AnomalyType::CiFailure);
    assert_eq!(tasks[1].anomaly_type, AnomalyType::PrCheckFailed);
}

#[test]
fn passing_pr_emits_no_tasks() {
    let status = PrStatus { number: 1, ci: CiStatus::Success, checks_passed: true };
    assert!(tasks_for_pr_status(&status).is_empty());
}

#[test]
fn push_failure_classification() {
    assert_eq!(classify_push_failure("! [rejected] main -> main (non-fast-forward)"), PushFailure::Rejected);
    assert_eq!(classify_push_failure("remote: Permission denied"), PushFailure::Permission);
    assert_eq!(classify_push_failure("fatal: Could not resolve host: github.com"), PushFailure::Network);
    assert_eq!(classify_push_failure("fatal: something else"), PushFailure::Unknown);
}
