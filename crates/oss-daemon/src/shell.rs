// SPDX-License-Identifier: MIT

//! Shared subprocess helper: every shell-based monitor bounds its call by a
//! timeout so a hung external command never blocks a tick (spec.md section 5).

use oss_monitors::MonitorError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub async fn run(mut command: Command, timeout: Duration) -> Result<String, MonitorError> {
    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| MonitorError::Shell("command timed out".to_string()))?
        .map_err(|e| MonitorError::Io(e.to_string()))?;

    if !output.status.success() {
        return Err(MonitorError::Shell(String::from_utf8_lossy(&output.stderr).trim().to_string()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
