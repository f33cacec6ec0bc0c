use super::*;
use crate::custom_command::FakeCustomCommandFetcher;
use oss_core::ChainStep;
use parking_lot::Mutex;
use std::sync::Arc;

struct RecordingInvoker {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl ChainInvoker for RecordingInvoker {
    async fn invoke(&self, command: &str) -> Result<(), EngineError> {
        self.calls.lock().push(command.to_string());
        Ok(())
    }
}

fn fetcher_ok() -> FakeCustomCommandFetcher {
    FakeCustomCommandFetcher { prompt: Ok("prompt".to_string()) }
}

/// E5: requirements always runs, api-design is conditional on API work, and a
/// human checkpoint is reached once the chain completes.
#[tokio::test]
async fn e5_api_design_runs_when_design_mentions_api() {
    let config = WorkflowConfig {
        chains_to: vec![
            ChainStep { command: "requirements".to_string(), always: true, condition: None, is_blocking: None },
            ChainStep { command: "api-design".to_string(), always: false, condition: Some("has_api_work".to_string()), is_blocking: None },
        ],
        checkpoint: Some(Checkpoint::Human),
        ..Default::default()
    };
    let ctx = WorkflowContext { design_content: Some("GET /users endpoint".to_string()), ..Default::default() };
    let calls = Arc::new(Mutex::new(Vec::new()));
    let invoker = RecordingInvoker { calls: calls.clone() };

    let report = run_chain(&config, &ctx, &invoker, &fetcher_ok()).await;

    assert_eq!(*calls.lock(), vec!["requirements", "api-design"]);
    assert_eq!(report.status, Some(ChainStatus::Checkpoint { message: "awaiting human checkpoint".to_string() }));
}

#[tokio::test]
async fn e5_api_design_skipped_when_ui_only() {
    let config = WorkflowConfig {
        chains_to: vec![
            ChainStep { command: "requirements".to_string(), always: true, condition: None, is_blocking: None },
            ChainStep { command: "api-design".to_string(), always: false, condition: Some("has_api_work".to_string()), is_blocking: None },
        ],
        checkpoint: Some(Checkpoint::Human),
        ..Default::default()
    };
    let ctx = WorkflowContext { design_content: Some("UI only".to_string()), ..Default::default() };
    let calls = Arc::new(Mutex::new(Vec::new()));
    let invoker = RecordingInvoker { calls: calls.clone() };

    let report = run_chain(&config, &ctx, &invoker, &fetcher_ok()).await;

    assert_eq!(*calls.lock(), vec!["requirements"]);
    assert_eq!(report.skipped, vec!["api-design"]);
}

#[tokio::test]
async fn blocking_custom_command_failure_stops_the_chain() {
    let config = WorkflowConfig {
        chains_to: vec![
            ChainStep { command: "@team/gate".to_string(), always: true, condition: None, is_blocking: None },
            ChainStep { command: "never-reached".to_string(), always: true, condition: None, is_blocking: None },
        ],
        ..Default::default()
    };
    let ctx = WorkflowContext::default();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let invoker = RecordingInvoker { calls: calls.clone() };
    let fetcher = FakeCustomCommandFetcher { prompt: Err("fetch failed".to_string()) };

    let report = run_chain(&config, &ctx, &invoker, &fetcher).await;

    assert!(calls.lock().is_empty());
    assert!(matches!(report.status, Some(ChainStatus::Error { .. })));
}

#[tokio::test]
async fn non_blocking_custom_command_failure_warns_and_continues() {
    let config = WorkflowConfig {
        chains_to: vec![ChainStep {
            command: "@team/advisory".to_string(),
            always: true,
            condition: None,
            is_blocking: Some(false),
        }],
        ..Default::default()
    };
    let ctx = WorkflowContext::default();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let invoker = RecordingInvoker { calls: calls.clone() };
    let fetcher = FakeCustomCommandFetcher { prompt: Err("fetch failed".to_string()) };

    let report = run_chain(&config, &ctx, &invoker, &fetcher).await;

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.status, Some(ChainStatus::Completed));
}

/// Property 12: items whose condition is false are skipped and never invoke
/// the invoker; items with `always=true` always invoke.
#[tokio::test]
async fn property_skip_semantics() {
    let config = WorkflowConfig {
        chains_to: vec![
            ChainStep { command: "a".to_string(), always: false, condition: Some("never".to_string()), is_blocking: None },
            ChainStep { command: "b".to_string(), always: true, condition: None, is_blocking: None },
        ],
        ..Default::default()
    };
    let ctx = WorkflowContext::default();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let invoker = RecordingInvoker { calls: calls.clone() };

    run_chain(&config, &ctx, &invoker, &fetcher_ok()).await;

    assert_eq!(*calls.lock(), vec!["b"]);
}
