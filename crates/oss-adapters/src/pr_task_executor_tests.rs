use super::*;

#[test]
fn pr_number_bounds() {
    assert!(validate_pr_number(1).is_ok());
    assert!(validate_pr_number(1_000_000_000).is_ok());
    assert!(validate_pr_number(0).is_err());
    assert!(validate_pr_number(1_000_000_001).is_err());
}

#[test]
fn comment_id_must_be_alphanumeric_with_dash_or_underscore() {
    assert!(validate_comment_id("abc_123-XYZ").is_ok());
    assert!(validate_comment_id("").is_err());
    assert!(validate_comment_id("has space").is_err());
    assert!(validate_comment_id("semi;colon").is_err());
}

#[test]
fn branch_name_rules() {
    assert!(validate_branch_name("feat/login-fix").is_ok());
    assert!(validate_branch_name("main").is_err());
    assert!(validate_branch_name("master").is_err());
    assert!(validate_branch_name("/leading-slash").is_err());
    assert!(validate_branch_name("trailing-dot.").is_err());
    assert!(validate_branch_name("has..dots").is_err());
}

#[test]
fn commit_message_is_written_to_a_real_file() {
    let path = write_commit_message_file("fix: resolve the thing\n").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "fix: resolve the thing\n");
    std::fs::remove_file(path).unwrap();
}

struct PassingGate;
#[async_trait::async_trait]
impl QualityGate for PassingGate {
    fn name(&self) -> &str {
        "tests"
    }
    async fn run(&self) -> Result<(), String> {
        Ok(())
    }
}

struct FailingGate;
#[async_trait::async_trait]
impl QualityGate for FailingGate {
    fn name(&self) -> &str {
        "lint"
    }
    async fn run(&self) -> Result<(), String> {
        Err("lint errors found".to_string())
    }
}

#[tokio::test]
async fn quality_gates_run_in_parallel_and_report_every_outcome() {
    let gates: Vec<Box<dyn QualityGate>> = vec![Box::new(PassingGate), Box::new(FailingGate)];
    let outcomes = run_quality_gates(&gates).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].passed);
    assert!(!outcomes[1].passed);
}

#[tokio::test]
async fn retry_stops_immediately_on_permanent_failure() {
    let outcome = retry_with_escalation(5, |_n| async { Err(("permanent".to_string(), true)) }).await;
    assert_eq!(outcome, RetryOutcome { attempts_used: 1, needs_escalation: true });
}

#[tokio::test]
async fn retry_succeeds_within_budget() {
    let outcome = retry_with_escalation(3, |n| async move {
        if n < 2 {
            Err(("transient".to_string(), false))
        } else {
            Ok(())
        }
    })
    .await;
    assert_eq!(outcome, RetryOutcome { attempts_used: 2, needs_escalation: false });
}

#[tokio::test]
async fn retry_exhaustion_sets_escalation_flag() {
    let outcome = retry_with_escalation(2, |_n| async { Err(("transient".to_string(), false)) }).await;
    assert_eq!(outcome, RetryOutcome { attempts_used: 2, needs_escalation: true });
}
