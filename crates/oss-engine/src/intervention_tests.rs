use super::*;
use std::collections::HashMap;

fn issue(confidence: f64) -> WorkflowIssue {
    WorkflowIssue {
        confidence,
        anomaly_type: AnomalyType::CiFailure,
        title: "CI failed".to_string(),
        message: "pipeline red".to_string(),
        suggested_agent: None,
        context: HashMap::new(),
    }
}

#[test]
fn high_confidence_auto_remediates_at_high_priority() {
    match generate(&issue(0.95)) {
        Response::AutoRemediate(summary) => assert_eq!(summary.input.priority, Priority::High),
        other => panic!("expected AutoRemediate, got {other:?}"),
    }
}

#[test]
fn boundary_confidence_notify_suggests() {
    match generate(&issue(0.9)) {
        Response::NotifySuggest(summary) => assert_eq!(summary.input.priority, Priority::Medium),
        other => panic!("expected NotifySuggest, got {other:?}"),
    }
    match generate(&issue(0.7)) {
        Response::NotifySuggest(_) => {}
        other => panic!("expected NotifySuggest, got {other:?}"),
    }
}

#[test]
fn low_confidence_notifies_only() {
    assert!(matches!(generate(&issue(0.3)), Response::NotifyOnly { .. }));
}
