use super::*;
use oss_core::AgentStep;

struct FlakyRunner;

#[async_trait::async_trait]
impl AgentRunner for FlakyRunner {
    async fn run(&self, agent: &str) -> Result<(), EngineError> {
        if agent == "boom" {
            Err(EngineError::Invoker("agent boom failed".to_string()))
        } else {
            Ok(())
        }
    }
}

fn steps() -> Vec<AgentStep> {
    vec![
        AgentStep { agent: "typescript-reviewer".to_string(), always: true, condition: None },
        AgentStep { agent: "boom".to_string(), always: true, condition: None },
        AgentStep { agent: "security-reviewer".to_string(), always: true, condition: None },
    ]
}

#[tokio::test]
async fn parallel_run_returns_every_result_despite_one_failure() {
    let results = run_parallel(&steps(), &FlakyRunner).await;
    assert_eq!(results.len(), 3);
    assert!(results[1].outcome.is_err());
    assert!(results[0].outcome.is_ok());
    assert!(results[2].outcome.is_ok());
}

#[tokio::test]
async fn sequential_run_also_continues_past_a_failure() {
    let results = run_sequential(&steps(), &FlakyRunner).await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[1].agent, "boom");
    assert!(results[1].outcome.is_err());
}
