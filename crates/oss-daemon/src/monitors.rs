// SPDX-License-Identifier: MIT

//! Concrete monitor wiring: bridges the pure/stateful monitor logic in
//! `oss-monitors` to real external sources (git CLI, `ps`, signals) so the
//! daemon tick loop has something to call (spec.md section 4.4).

use crate::shell;
use chrono::Utc;
use oss_core::TaskInput;
use oss_engine::RuleMatch;
use oss_monitors::git::{classify_push_failure, tasks_for_pr_status, CiStatus, PrStatus};
use oss_monitors::hung_process::{decide_and_kill, KillDecision, ProcessKiller};
use oss_monitors::process::{classify, ProcessInfo, ProcessLister};
use oss_monitors::MonitorError;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;

const GIT_TIMEOUT: Duration = Duration::from_secs(10);

#[allow(clippy::expect_used)]
static IRON_LAW_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?:❌|✅)\s*LAW #(\d+):\s*(.+)").expect("constant regex pattern is valid"));

/// Parsed `❌ LAW #N: message` / `✅ LAW #N: message` marker. `true` means the
/// law was violated, `false` means it passed.
pub struct IronLawMarker {
    pub violated: bool,
    pub law: u32,
    pub message: String,
}

/// Scans one log line for an iron-law marker (spec.md section 4.4).
pub fn parse_iron_law_marker(line: &str) -> Option<IronLawMarker> {
    let caps = IRON_LAW_RE.captures(line)?;
    let law: u32 = caps.get(1)?.as_str().parse().ok()?;
    let message = caps.get(2)?.as_str().trim().to_string();
    Some(IronLawMarker { violated: line.trim_start().starts_with('❌'), law, message })
}

pub fn rule_match_to_task_input(m: RuleMatch, source: &str) -> TaskInput {
    TaskInput {
        priority: m.priority,
        source: source.to_string(),
        anomaly_type: m.anomaly_type,
        prompt: m.prompt,
        suggested_agent: m.suggested_agent,
        context: m.context,
    }
}

/// Reads the currently checked-out branch via `git branch --show-current`.
pub struct GitBranchSource {
    pub repo_path: PathBuf,
}

impl GitBranchSource {
    pub async fn current_branch(&self) -> Result<String, MonitorError> {
        let mut cmd = Command::new("git");
        cmd.args(["-C", &self.repo_path.display().to_string(), "branch", "--show-current"]);
        shell::run(cmd, GIT_TIMEOUT).await
    }
}

/// Minimal shape produced by an external git-forge CLI's PR status query.
#[derive(Debug, Clone, serde::Deserialize)]
struct RawPrStatus {
    number: u64,
    #[serde(rename = "state")]
    ci_state: String,
    #[serde(rename = "checksPassed")]
    checks_passed: bool,
}

/// Queries PR CI/check status via the `gh` CLI (the pack's reference
/// git-forge tool) and converts it to queue tasks.
pub struct GhPrStatusSource {
    pub repo_path: PathBuf,
}

impl GhPrStatusSource {
    pub async fn fetch_tasks(&self) -> Result<Vec<TaskInput>, MonitorError> {
        let mut cmd = Command::new("gh");
        cmd.args([
            "-C",
            &self.repo_path.display().to_string(),
            "pr",
            "status",
            "--json",
            "number,state,checksPassed",
        ]);
        let output = shell::run(cmd, GIT_TIMEOUT).await?;
        let raw: Vec<RawPrStatus> = serde_json::from_str(&output).map_err(|e| MonitorError::Parse(e.to_string()))?;

        Ok(raw
            .into_iter()
            .flat_map(|r| {
                let ci = match r.ci_state.to_uppercase().as_str() {
                    "SUCCESS" | "MERGED" => CiStatus::Success,
                    "FAILURE" | "ERROR" => CiStatus::Failure,
                    _ => CiStatus::Pending,
                };
                tasks_for_pr_status(&PrStatus { number: r.number, ci, checks_passed: r.checks_passed })
            })
            .collect())
    }

    /// Classifies the stderr of a failed `git push` so the caller can decide
    /// whether to retry (network/unknown) or surface the failure (rejected/permission).
    pub fn classify_push(&self, stderr: &str) -> oss_monitors::git::PushFailure {
        classify_push_failure(stderr)
    }
}

/// `ps`-backed process lister, filtered by command substring, bounded by the
/// shared subprocess timeout (spec.md section 5).
pub struct PsProcessLister;

impl ProcessLister for PsProcessLister {
    fn list(&self, command_filter: &str) -> Result<Vec<ProcessInfo>, MonitorError> {
        let output = std::process::Command::new("ps")
            .args(["-eo", "pid,lstart,command"])
            .output()
            .map_err(|e| MonitorError::Io(e.to_string()))?;
        if !output.status.success() {
            return Err(MonitorError::Shell(String::from_utf8_lossy(&output.stderr).to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut processes = Vec::new();
        for line in stdout.lines().skip(1) {
            let trimmed = line.trim();
            if !trimmed.to_lowercase().contains(&command_filter.to_lowercase()) {
                continue;
            }
            // `pid` then a fixed-width `lstart` ("Mon Jul 28 09:00:00 2026"), then the command.
            let mut parts = trimmed.splitn(2, char::is_whitespace);
            let Some(pid_str) = parts.next() else { continue };
            let Ok(pid) = pid_str.parse::<u32>() else { continue };
            let rest = parts.next().unwrap_or_default().trim();
            if rest.len() < 24 {
                continue;
            }
            let (lstart, command) = rest.split_at(24);
            let Ok(started_at) = chrono::NaiveDateTime::parse_from_str(lstart.trim(), "%a %b %e %T %Y") else { continue };
            processes.push(ProcessInfo {
                pid,
                command: command.trim().to_string(),
                started_at: started_at.and_utc(),
            });
        }
        Ok(processes)
    }
}

/// Sends `SIGTERM`/`SIGKILL` via `nix`, matching the PID-file liveness probe
/// already used for daemon mutual exclusion.
pub struct SignalProcessKiller;

impl ProcessKiller for SignalProcessKiller {
    fn terminate(&self, pid: u32) -> Result<(), MonitorError> {
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), nix::sys::signal::Signal::SIGTERM)
            .map_err(|e| MonitorError::Shell(e.to_string()))
    }

    fn kill(&self, pid: u32) -> Result<(), MonitorError> {
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), nix::sys::signal::Signal::SIGKILL)
            .map_err(|e| MonitorError::Shell(e.to_string()))
    }
}

/// Sweeps every process matching `command_filter`, killing (or dry-run
/// reporting) those classified as hung for their kind's timeout.
pub fn sweep_hung_processes(
    lister: &dyn ProcessLister,
    killer: &dyn ProcessKiller,
    command_filter: &str,
    dry_run: bool,
    now: chrono::DateTime<Utc>,
) -> Result<Vec<KillDecision>, MonitorError> {
    let processes = lister.list(command_filter)?;
    Ok(processes
        .into_iter()
        .map(|process| {
            let kind = classify(&process.command);
            decide_and_kill(&process, kind, now, dry_run, killer)
        })
        .collect())
}

/// Runs the configured health-check command via `sh -c`, synchronously
/// (spec.md section 4.4, `health-check.log`).
pub struct ShellHealthCheckRunner {
    pub command: String,
}

impl oss_monitors::health_check::HealthCheckRunner for ShellHealthCheckRunner {
    fn run(&self) -> Result<(String, u64), MonitorError> {
        let start = std::time::Instant::now();
        let output = std::process::Command::new("sh")
            .args(["-c", &self.command])
            .output()
            .map_err(|e| MonitorError::Io(e.to_string()))?;
        let duration_ms = start.elapsed().as_millis() as u64;
        if !output.status.success() {
            return Err(MonitorError::Shell(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }
        Ok((String::from_utf8_lossy(&output.stdout).trim().to_string(), duration_ms))
    }
}

#[cfg(test)]
#[path = "monitors_tests.rs"]
mod tests;
