// SPDX-License-Identifier: MIT

//! PID-file based mutual exclusion for the daemon (spec.md sections 4.3 and 8.5).

use nix::sys::signal::kill;
use nix::unistd::Pid;
use oss_core::SupervisorError;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("daemon already running with pid {0}")]
    AlreadyRunning(i32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Guard that removes the PID file on drop (daemon stop).
pub struct PidFile {
    path: PathBuf,
}

/// Read the PID file and check liveness with a signal-0 probe. If the PID is
/// dead, the stale file is removed and start proceeds (spec.md section 4.3,
/// "Start procedure").
pub fn acquire(path: &Path) -> Result<PidFile, PidFileError> {
    if let Some(existing) = read_pid(path)? {
        if is_alive(existing) {
            return Err(PidFileError::AlreadyRunning(existing));
        }
        std::fs::remove_file(path)?;
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{}\n", std::process::id()))?;
    Ok(PidFile { path: path.to_path_buf() })
}

pub fn read_pid(path: &Path) -> Result<Option<i32>, std::io::Error> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.trim().parse::<i32>().ok()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_alive(pid: i32) -> bool {
    kill(Pid::from_raw(pid), None).is_ok()
}

impl PidFile {
    pub fn release(self) -> Result<(), SupervisorError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// E5 (property 5): two concurrent starts — exactly one succeeds.
    #[test]
    fn second_start_fails_with_already_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        let guard = acquire(&path).unwrap();
        let err = acquire(&path).unwrap_err();
        assert!(matches!(err, PidFileError::AlreadyRunning(_)));
        drop(guard);
    }

    #[test]
    fn stale_pid_file_is_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        // A PID that (almost certainly) does not correspond to a live process.
        std::fs::write(&path, "999999\n").unwrap();
        let guard = acquire(&path).unwrap();
        assert_eq!(read_pid(&path).unwrap(), Some(std::process::id() as i32));
        drop(guard);
    }

    #[test]
    fn release_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.pid");
        let guard = acquire(&path).unwrap();
        guard.release().unwrap();
        assert!(!path.exists());
    }
}
