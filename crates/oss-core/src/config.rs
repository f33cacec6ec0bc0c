// SPDX-License-Identifier: MIT

//! Filesystem layout and config resolution (spec.md sections 4.8 and 6).

use std::path::{Path, PathBuf};

/// Resolved `~/.oss` (user) and `.oss` (project) directories.
#[derive(Debug, Clone)]
pub struct Paths {
    pub user_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl Paths {
    /// Resolves `OSS_CONFIG_DIR` (overrides the default `~/.oss`) plus the
    /// project-local `.oss` relative to `cwd` (spec.md section 6, "Environment
    /// variables").
    pub fn resolve(cwd: &Path) -> Self {
        let user_dir = std::env::var_os("OSS_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".oss")))
            .unwrap_or_else(|| PathBuf::from(".oss"));
        Self { user_dir, project_dir: cwd.join(".oss") }
    }

    pub fn pid_file(&self) -> PathBuf {
        self.user_dir.join("daemon.pid")
    }

    pub fn daemon_log(&self) -> PathBuf {
        self.user_dir.join("daemon.log")
    }

    pub fn daemon_error_log(&self) -> PathBuf {
        self.user_dir.join("daemon.error.log")
    }

    pub fn health_check_log(&self) -> PathBuf {
        self.user_dir.join("health-check.log")
    }

    pub fn queue_json(&self) -> PathBuf {
        self.user_dir.join("queue.json")
    }

    pub fn queue_failed_json(&self) -> PathBuf {
        self.user_dir.join("queue-failed.json")
    }

    pub fn queue_expired_json(&self) -> PathBuf {
        self.user_dir.join("queue-expired.json")
    }

    pub fn workflow_state_json(&self) -> PathBuf {
        self.user_dir.join("workflow-state.json")
    }

    pub fn pr_monitor_state_json(&self) -> PathBuf {
        self.user_dir.join("pr-monitor-state.json")
    }

    pub fn config_json(&self) -> PathBuf {
        self.user_dir.join("config.json")
    }

    pub fn usage_json(&self) -> PathBuf {
        self.user_dir.join("usage.json")
    }

    pub fn prompt_cache_dir(&self) -> PathBuf {
        self.user_dir.join("prompt-cache")
    }
}

/// Five-level override chain for model-id resolution, highest precedence
/// first (spec.md section 4.8, "Config precedence").
#[derive(Debug, Clone, Default)]
pub struct ModelIdSources<'a> {
    pub cli: Option<&'a str>,
    pub project: Option<&'a str>,
    pub user: Option<&'a str>,
    pub frontmatter: Option<&'a str>,
}

/// Pure resolver, independently testable and cacheable per (kind, name) per
/// spec.md section 9, "Config precedence for model routing".
pub fn resolve_model_id(sources: ModelIdSources<'_>, default: &str) -> String {
    sources
        .cli
        .or(sources.project)
        .or(sources.user)
        .or(sources.frontmatter)
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
