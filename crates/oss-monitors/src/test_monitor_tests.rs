use super::*;

#[test]
fn first_run_never_regresses() {
    let mut doc = FeatureTestingDocument::default();
    assert!(record_run("login", &mut doc, TestRunResult { passed: 10, failed: 0 }).is_none());
    assert_eq!(doc.last_result, Some(TestRunResult { passed: 10, failed: 0 }));
}

#[test]
fn increased_failures_emit_a_regression_task() {
    let mut doc = FeatureTestingDocument { last_result: Some(TestRunResult { passed: 10, failed: 0 }) };
    let task = record_run("login", &mut doc, TestRunResult { passed: 8, failed: 2 }).unwrap();
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.context.get("failed").and_then(|v| v.as_u64()), Some(2));
}

#[test]
fn same_or_fewer_failures_do_not_regress() {
    let mut doc = FeatureTestingDocument { last_result: Some(TestRunResult { passed: 8, failed: 2 }) };
    assert!(record_run("login", &mut doc, TestRunResult { passed: 10, failed: 0 }).is_none());
}
