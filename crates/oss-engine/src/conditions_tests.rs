use super::*;

fn ctx(design: &str) -> WorkflowContext {
    WorkflowContext { design_content: Some(design.to_string()), ..Default::default() }
}

#[test]
fn always_and_never_are_fixed() {
    let empty = WorkflowContext::default();
    assert!(evaluate("always", &empty));
    assert!(!evaluate("never", &empty));
}

#[test]
fn has_api_work_matches_design_content() {
    assert!(evaluate("has_api_work", &ctx("GET /users endpoint")));
    assert!(!evaluate("has_api_work", &ctx("UI only")));
}

#[test]
fn has_test_failures_reads_last_test_result() {
    let mut c = WorkflowContext::default();
    c.last_test_result = Some(TestResult::Failed);
    assert!(evaluate("has_test_failures", &c));
    c.last_test_result = Some(TestResult::Passed);
    assert!(!evaluate("has_test_failures", &c));
}

#[test]
fn unknown_condition_defaults_to_false() {
    assert!(!evaluate("has_quantum_work", &WorkflowContext::default()));
}
