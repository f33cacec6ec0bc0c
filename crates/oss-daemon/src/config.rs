// SPDX-License-Identifier: MIT

//! Daemon configuration document (`config.json`, spec.md sections 4.3-4.8).

use serde::{Deserialize, Serialize};

fn default_check_interval_ms() -> u64 {
    5_000
}

fn default_max_queue_size() -> usize {
    oss_core::DEFAULT_MAX_SIZE
}

fn default_rate_limit_per_minute() -> u32 {
    10
}

fn default_stale_tdd_threshold_ms() -> i64 {
    30 * 60 * 1000
}

fn default_stuck_timeout_seconds() -> i64 {
    300
}

fn default_health_check_interval_ms() -> u64 {
    60_000
}

fn default_true() -> bool {
    true
}

/// Persisted daemon config, read once at startup from `Paths::config_json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
    #[serde(default)]
    pub webhook_enabled: bool,
    #[serde(default)]
    pub webhook_secret: String,
    #[serde(default = "default_rate_limit_per_minute")]
    pub webhook_rate_limit_per_minute: u32,
    #[serde(default = "default_stale_tdd_threshold_ms")]
    pub stale_tdd_threshold_ms: i64,
    #[serde(default = "default_stuck_timeout_seconds")]
    pub stuck_timeout_seconds: i64,
    #[serde(default)]
    pub health_check_command: Option<String>,
    #[serde(default = "default_health_check_interval_ms")]
    pub health_check_interval_ms: u64,
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
            max_queue_size: default_max_queue_size(),
            webhook_enabled: false,
            webhook_secret: String::new(),
            webhook_rate_limit_per_minute: default_rate_limit_per_minute(),
            stale_tdd_threshold_ms: default_stale_tdd_threshold_ms(),
            stuck_timeout_seconds: default_stuck_timeout_seconds(),
            health_check_command: None,
            health_check_interval_ms: default_health_check_interval_ms(),
            fallback_enabled: default_true(),
            dry_run: false,
        }
    }
}

impl DaemonConfig {
    /// Loads `config.json`, falling back to defaults when absent or corrupt
    /// (same "missing/corrupt reads as empty" posture as the state store).
    pub fn load(path: &std::path::Path) -> oss_core::Result<Self> {
        Ok(oss_storage::read_json(path)?.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
