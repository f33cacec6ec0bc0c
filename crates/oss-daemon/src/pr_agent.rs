// SPDX-License-Identifier: MIT

//! PR Monitor background agent: the reference agent from spec.md section
//! 4.6.1, wired to the `gh` CLI and the queue store.

use crate::shell;
use oss_adapters::agent_registry::BackgroundAgent;
use oss_adapters::error::AdapterError;
use oss_adapters::pr_monitor::{build_remediation_context, is_change_request, ReviewComment};
use oss_core::{AgentMetadata, AnomalyType, Clock, PrMonitorState, Priority, TaskInput};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

const GH_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, serde::Deserialize)]
struct RawPr {
    number: u64,
    #[serde(rename = "headRefName")]
    head_ref_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
struct RawComment {
    id: String,
    body: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    line: Option<u32>,
}

fn to_adapter_err(e: oss_core::SupervisorError) -> AdapterError {
    AdapterError::Subprocess(e.to_string())
}

/// Polls open PRs via `gh`, queues a remediation task for every unseen
/// change-request comment, and persists processed-comment state with TTL
/// cleanup (spec.md section 4.6.1).
pub struct PrMonitorAgent<C: Clock + 'static> {
    repo_path: PathBuf,
    state_path: PathBuf,
    clock: C,
    queue: Arc<Mutex<oss_storage::QueueStore<C>>>,
    state: Mutex<PrMonitorState>,
}

impl<C: Clock + 'static> PrMonitorAgent<C> {
    pub fn new(repo_path: PathBuf, state_path: PathBuf, clock: C, queue: Arc<Mutex<oss_storage::QueueStore<C>>>) -> Self {
        Self { repo_path, state_path, clock, queue, state: Mutex::new(PrMonitorState::default()) }
    }

    async fn list_open_prs(&self) -> Result<Vec<RawPr>, AdapterError> {
        let mut cmd = Command::new("gh");
        cmd.args(["-C", &self.repo_path.display().to_string(), "pr", "list", "--json", "number,headRefName"]);
        let output = shell::run(cmd, GH_TIMEOUT).await.map_err(|e| AdapterError::Subprocess(e.to_string()))?;
        serde_json::from_str(&output).map_err(|e| AdapterError::Subprocess(e.to_string()))
    }

    async fn review_comments(&self, pr_number: u64) -> Result<Vec<RawComment>, AdapterError> {
        let mut cmd = Command::new("gh");
        cmd.args([
            "-C",
            &self.repo_path.display().to_string(),
            "api",
            &format!("repos/{{owner}}/{{repo}}/pulls/{pr_number}/comments"),
        ]);
        let output = shell::run(cmd, GH_TIMEOUT).await.map_err(|e| AdapterError::Subprocess(e.to_string()))?;
        serde_json::from_str(&output).map_err(|e| AdapterError::Subprocess(e.to_string()))
    }

    async fn acknowledge(&self, pr_number: u64, comment_id: &str) -> Result<(), AdapterError> {
        let mut cmd = Command::new("gh");
        cmd.args([
            "-C",
            &self.repo_path.display().to_string(),
            "api",
            &format!("repos/{{owner}}/{{repo}}/pulls/{pr_number}/comments/{comment_id}/replies"),
            "-f",
            "body=Queued for remediation.",
        ]);
        shell::run(cmd, GH_TIMEOUT).await.map(|_| ()).map_err(|e| AdapterError::Subprocess(e.to_string()))
    }

    fn persist(&self) -> Result<(), AdapterError> {
        let state = self.state.lock().clone();
        oss_storage::write_json(&self.state_path, &state).map_err(to_adapter_err)
    }
}

#[async_trait::async_trait]
impl<C: Clock + 'static> BackgroundAgent for PrMonitorAgent<C> {
    fn metadata(&self) -> AgentMetadata {
        AgentMetadata {
            name: "pr_monitor".to_string(),
            description: "Watches open PRs for change-request review comments".to_string(),
            version: "1.0.0".to_string(),
        }
    }

    async fn initialize(&self) -> Result<(), AdapterError> {
        let loaded: PrMonitorState = oss_storage::read_json(&self.state_path).map_err(to_adapter_err)?.unwrap_or_default();
        *self.state.lock() = loaded;
        self.state.lock().cleanup_expired(self.clock.now());
        Ok(())
    }

    async fn start(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), AdapterError> {
        self.persist()
    }

    async fn poll(&self) -> Result<(), AdapterError> {
        let now = self.clock.now();
        for pr in self.list_open_prs().await? {
            for comment in self.review_comments(pr.number).await? {
                let already_seen = self.state.lock().has_processed(&comment.id);
                if already_seen || !is_change_request(&comment.body) {
                    continue;
                }

                let review = ReviewComment { id: comment.id.clone(), body: comment.body.clone(), path: comment.path, line: comment.line };
                let context = build_remediation_context(pr.number, &pr.head_ref_name, &review);

                self.acknowledge(pr.number, &comment.id).await?;

                self.queue
                    .lock()
                    .add(TaskInput {
                        priority: Priority::Medium,
                        source: "pr_monitor".to_string(),
                        anomaly_type: AnomalyType::PrRemediation,
                        prompt: format!("Address review comment on PR #{}: {}", pr.number, comment.body),
                        suggested_agent: Some(context.suggested_agent.clone()),
                        context: context.to_context_map(),
                    })
                    .map_err(to_adapter_err)?;

                let mut state = self.state.lock();
                state.mark_processed(comment.id, now);
                state.tasks_queued += 1;
                state.last_poll_time = Some(now);
            }
        }

        self.state.lock().cleanup_expired(now);
        self.persist()
    }
}

#[cfg(test)]
#[path = "pr_agent_tests.rs"]
mod tests;
