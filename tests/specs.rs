//! Workspace-level integration tests against the `ossd` binary.
//!
//! Each test runs in its own temporary directory with `OSS_CONFIG_DIR`
//! pointed at it, so daemon state never leaks between tests or touches a
//! developer's real `~/.config/ossd`.

use assert_cmd::Command;
use std::path::Path;

fn ossd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ossd").unwrap();
    cmd.env("OSS_CONFIG_DIR", dir).current_dir(dir);
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let assert = ossd(dir.path()).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for name in ["start", "stop", "status", "install", "uninstall"] {
        assert!(stdout.contains(name), "--help output missing `{name}`: {stdout}");
    }
}

#[test]
fn status_on_an_unstarted_directory_reports_not_running() {
    let dir = tempfile::tempdir().unwrap();
    let assert = ossd(dir.path()).arg("status").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("not running"));
}

#[test]
fn stop_on_an_unstarted_directory_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let assert = ossd(dir.path()).arg("stop").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("not running"));
}

#[test]
fn start_dry_run_daemonized_writes_a_pid_file_then_stop_removes_it() {
    let dir = tempfile::tempdir().unwrap();

    ossd(dir.path()).args(["start", "--daemonize", "--dry-run"]).assert().success();

    let pid_file = dir.path().join("daemon.pid");
    for _ in 0..50 {
        if pid_file.exists() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    assert!(pid_file.exists(), "expected pid file at {}", pid_file.display());

    ossd(dir.path()).arg("stop").assert().success();
    for _ in 0..50 {
        if !pid_file.exists() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    assert!(!pid_file.exists(), "pid file should be removed after stop");
}
