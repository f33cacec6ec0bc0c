// SPDX-License-Identifier: MIT

//! Daemon core: PID lifecycle, tick loop, issue prioritization, and wiring
//! of monitors/queue/state/agents/webhook (spec.md section 4.3).

use crate::config::DaemonConfig;
use crate::monitors::{
    parse_iron_law_marker, rule_match_to_task_input, sweep_hung_processes, GhPrStatusSource, GitBranchSource,
    PsProcessLister, ShellHealthCheckRunner, SignalProcessKiller,
};
use crate::notifier::{DesktopNotifier, NotifyRustNotifier};
use crate::pr_agent::PrMonitorAgent;
use oss_adapters::AgentRegistry;
use oss_core::{Clock, Issue, IssueSeverity, Paths, SupervisorError};
use oss_monitors::health_check::HealthCheckScheduler;
use oss_monitors::iron_law::IronLawMonitor;
use oss_monitors::log_monitor::LogMonitor;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

impl From<oss_storage::PidFileError> for SupervisorError {
    fn from(err: oss_storage::PidFileError) -> Self {
        SupervisorError::InvariantViolation(err.to_string())
    }
}

/// The running supervisor: owns every monitor and adapter and drives one
/// tick at a time. Never cloned; one instance per live daemon process.
pub struct Daemon<C: Clock + 'static> {
    paths: Paths,
    config: DaemonConfig,
    clock: C,
    pid_file: Option<oss_storage::PidFile>,
    queue: Arc<Mutex<oss_storage::QueueStore<C>>>,
    state: oss_storage::StateStore,
    log_monitor: LogMonitor,
    iron_law: IronLawMonitor,
    git_source: GitBranchSource,
    pr_status_source: GhPrStatusSource,
    process_lister: PsProcessLister,
    process_killer: SignalProcessKiller,
    health_check: Option<HealthCheckScheduler<ShellHealthCheckRunner>>,
    agents: AgentRegistry,
    notifier: Box<dyn DesktopNotifier>,
    last_branch: Option<String>,
}

impl<C: Clock + 'static> Daemon<C> {
    /// Builds a daemon rooted at `cwd`, loading `config.json` and opening the
    /// queue/state documents under `Paths` (spec.md section 4.3, "Start procedure").
    pub fn new(cwd: &std::path::Path, clock: C) -> oss_core::Result<Self> {
        let paths = Paths::resolve(cwd);
        let config = DaemonConfig::load(&paths.config_json())?;

        let queue = Arc::new(Mutex::new(oss_storage::QueueStore::open(
            paths.queue_json(),
            paths.queue_failed_json(),
            paths.queue_expired_json(),
            config.max_queue_size,
            clock.clone(),
        )?));
        let state = oss_storage::StateStore::new(paths.workflow_state_json());

        let health_check = config
            .health_check_command
            .clone()
            .map(|command| HealthCheckScheduler::new(ShellHealthCheckRunner { command }));

        let mut agents = AgentRegistry::new();
        agents.register(
            Arc::new(PrMonitorAgent::new(cwd.to_path_buf(), paths.pr_monitor_state_json(), clock.clone(), Arc::clone(&queue))),
            oss_core::AgentConfig::default(),
        );

        Ok(Self {
            git_source: GitBranchSource { repo_path: cwd.to_path_buf() },
            pr_status_source: GhPrStatusSource { repo_path: cwd.to_path_buf() },
            process_lister: PsProcessLister,
            process_killer: SignalProcessKiller,
            health_check,
            agents,
            notifier: Box::new(NotifyRustNotifier),
            log_monitor: LogMonitor::new(oss_monitors::log_monitor::DEFAULT_CAPACITY),
            iron_law: IronLawMonitor::new(),
            last_branch: None,
            queue,
            state,
            paths,
            config,
            clock,
            pid_file: None,
        })
    }

    /// Acquires the PID file and starts every registered agent (spec.md
    /// section 4.3, "Start procedure"). Fails if another instance is alive.
    pub async fn start(&mut self) -> oss_core::Result<()> {
        self.pid_file = Some(oss_storage::acquire_pid_file(&self.paths.pid_file())?);
        for (name, result) in self.agents.start_all().await {
            if let Err(e) = result {
                tracing::warn!(agent = %name, error = %e, "agent failed to start");
            }
        }
        Ok(())
    }

    /// Releases the PID file and stops every agent (spec.md section 4.3,
    /// "Stop procedure"). Idempotent; safe to call even if `start` never ran.
    pub async fn stop(&mut self) -> oss_core::Result<()> {
        for (name, result) in self.agents.stop_all().await {
            if let Err(e) = result {
                tracing::warn!(agent = %name, error = %e, "agent failed to stop");
            }
        }
        if let Some(pid_file) = self.pid_file.take() {
            pid_file.release()?;
        }
        Ok(())
    }

    /// Feeds one session-log line through the ring buffer, rule engine, and
    /// iron-law marker scan, queuing whatever tasks result (spec.md section 4.4).
    pub fn ingest_log_line(&mut self, line: &str, now: chrono::DateTime<chrono::Utc>) -> oss_core::Result<()> {
        let rule_match = self.log_monitor.ingest(line, now);
        let marker = parse_iron_law_marker(line);

        // An iron-law marker line's escalation is owned by `IronLawMonitor`
        // (first violation is silent, third+ escalates); the rule engine's
        // own flat `IronLawViolation` match for the same line is dropped here
        // to avoid double-queuing.
        if let Some(marker) = marker {
            let task = if marker.violated {
                self.iron_law.record_violation(marker.law, &marker.message)
            } else {
                self.iron_law.record_pass(marker.law);
                None
            };
            if let Some(task) = task {
                self.notifier.notify("Iron law violated", &task.prompt);
                self.queue.lock().add(task)?;
            }
        } else if let Some(rule_match) = rule_match {
            self.queue.lock().add(rule_match_to_task_input(rule_match, "log_monitor"))?;
        }

        if let Some(stuck) = self.log_monitor.check_and_report_stuck(self.config.stuck_timeout_seconds, now) {
            self.queue.lock().add(stuck)?;
        }
        Ok(())
    }

    /// Runs one supervisor tick: heartbeat, branch/TDD/hung-process/health
    /// checks, PR-status polling, agent polling, and issue prioritization
    /// (spec.md sections 4.3 and 4.4).
    pub async fn tick(&mut self) -> oss_core::Result<()> {
        let now = self.clock.now();
        let mut issues: Vec<Issue> = Vec::new();

        self.state.mutate(|s| s.set_daemon_heartbeat(now))?;

        if let Ok(branch) = self.git_source.current_branch().await {
            if !branch.is_empty() && self.last_branch.as_deref() != Some(branch.as_str()) {
                tracing::info!(branch = %branch, "checked-out branch changed");
                self.last_branch = Some(branch);
            }
            if let Some(issue) = oss_monitors::git::check_branch(&branch) {
                issues.push(issue);
            }
        }

        let state_snapshot = self.state.read()?;
        if let Some(issue) = oss_monitors::tdd::check_stale_phase(&state_snapshot, now.timestamp_millis(), self.config.stale_tdd_threshold_ms) {
            issues.push(issue);
        }

        match self.pr_status_source.fetch_tasks().await {
            Ok(tasks) => {
                for task in tasks {
                    self.queue.lock().add(task)?;
                }
            }
            Err(e) => tracing::warn!(error = %e, "pr status fetch failed"),
        }

        // Scoped to known test-runner substrings rather than every process on
        // the host: a blanket filter would let the generic `node` bucket's
        // 15-minute timeout reap an unrelated long-lived server.
        for filter in ["vitest", "npm test", "jest"] {
            match sweep_hung_processes(&self.process_lister, &self.process_killer, filter, self.config.dry_run, now) {
                Ok(decisions) => {
                    for decision in decisions.iter().filter(|d| d.success && d.reason == "exceeded timeout") {
                        tracing::info!(pid = decision.pid, dry_run = decision.dry_run, "hung process killed");
                    }
                }
                Err(e) => tracing::warn!(error = %e, filter, "hung process sweep failed"),
            }
        }

        if let Some(scheduler) = &self.health_check {
            let (result, log_record) = scheduler.tick(now);
            if let Err(e) = append_log(&self.paths.health_check_log(), &log_record) {
                tracing::warn!(error = %e, "failed to append health-check log");
            }
            if !result.success {
                issues.push(Issue {
                    issue_type: "health_check_failed".to_string(),
                    message: result.error.clone().unwrap_or_else(|| "health check failed".to_string()),
                    severity: IssueSeverity::Error,
                });
            }
        }

        for name in self.agents.agent_names() {
            if let Some(event) = self.agents.poll_agent(&name, now).await {
                tracing::info!(?event, agent = %name, "agent health transition");
            }
        }

        self.state.mutate(|s| match oss_core::prioritize_issues(issues) {
            Some(issue) => s.report_issue(issue),
            None => s.clear_issue(),
        })?;

        append_log(&self.paths.daemon_log(), &format!("[{}] tick complete\n", now.to_rfc3339()))?;
        Ok(())
    }

    /// Drives the tick loop until `shutdown` resolves (spec.md section 4.3).
    /// Ticks never overlap: the next interval fires only after the previous
    /// tick's await chain completes.
    pub async fn run(mut self, mut shutdown: tokio::sync::oneshot::Receiver<()>) {
        let mut interval = tokio::time::interval(Duration::from_millis(self.config.check_interval_ms));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        tracing::error!(error = %e, "tick failed");
                    }
                }
                _ = &mut shutdown => {
                    if let Err(e) = self.stop().await {
                        tracing::error!(error = %e, "shutdown failed");
                    }
                    break;
                }
            }
        }
    }
}

fn append_log(path: &std::path::Path, line: &str) -> oss_core::Result<()> {
    use std::io::Write;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
