// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `ossd`: start/stop/status/install/uninstall for the supervisor daemon
//! (spec.md section 4.3 and 6).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use oss_core::Paths;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

#[derive(Parser)]
#[command(name = "ossd", version, about = "Developer-workflow supervisor daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon
    Start {
        /// Fork into the background instead of running in the foreground
        #[arg(long)]
        daemonize: bool,
        /// Run every monitor in report-only mode, never killing processes or pushing changes
        #[arg(long)]
        dry_run: bool,
    },
    /// Stop the running daemon
    Stop,
    /// Report whether the daemon is running and since when
    Status,
    /// Install a user-level systemd unit that starts the daemon on login
    Install,
    /// Remove the installed systemd unit
    Uninstall,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("error: cannot determine current directory: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Start { daemonize, dry_run } => start(&cwd, daemonize, dry_run),
        Command::Stop => stop(&cwd),
        Command::Status => status(&cwd),
        Command::Install => install(&cwd),
        Command::Uninstall => uninstall(&cwd),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn start(cwd: &Path, daemonize: bool, dry_run: bool) -> Result<()> {
    let paths = Paths::resolve(cwd);

    if let Some(pid) = oss_storage::read_pid(&paths.pid_file()).context("reading pid file")? {
        if nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), None).is_ok() {
            println!("Daemon already running (pid {pid})");
            return Ok(());
        }
    }

    if dry_run {
        apply_dry_run_override(&paths)?;
    }

    if daemonize {
        let exe = std::env::current_exe().context("locating own executable")?;
        std::fs::create_dir_all(&paths.user_dir)?;
        let stdout = std::fs::OpenOptions::new().create(true).append(true).open(paths.daemon_log())?;
        let stderr = std::fs::OpenOptions::new().create(true).append(true).open(paths.daemon_error_log())?;

        let child = std::process::Command::new(exe)
            .arg("start")
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .context("spawning background daemon process")?;
        println!("Daemon started (pid {})", child.id());
        return Ok(());
    }

    run_foreground(cwd)
}

fn apply_dry_run_override(paths: &Paths) -> Result<()> {
    let mut config = oss_daemon::DaemonConfig::load(&paths.config_json())?;
    config.dry_run = true;
    oss_storage::write_json(&paths.config_json(), &config)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn run_foreground(cwd: &Path) -> Result<()> {
    let mut daemon = oss_daemon::Daemon::new(cwd, oss_core::SystemClock)?;
    daemon.start().await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });

    daemon.run(shutdown_rx).await;
    Ok(())
}

fn stop(cwd: &Path) -> Result<()> {
    let paths = Paths::resolve(cwd);
    let Some(pid) = oss_storage::read_pid(&paths.pid_file()).context("reading pid file")? else {
        println!("Daemon not running");
        return Ok(());
    };

    match nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), nix::sys::signal::Signal::SIGTERM) {
        Ok(()) => {
            println!("Sent SIGTERM to daemon (pid {pid})");
            Ok(())
        }
        Err(nix::errno::Errno::ESRCH) => {
            std::fs::remove_file(paths.pid_file()).ok();
            println!("Daemon not running (stale pid file removed)");
            Ok(())
        }
        Err(e) => bail!("failed to signal daemon (pid {pid}): {e}"),
    }
}

fn status(cwd: &Path) -> Result<()> {
    let paths = Paths::resolve(cwd);
    let Some(pid) = oss_storage::read_pid(&paths.pid_file()).context("reading pid file")? else {
        println!("Status: not running");
        return Ok(());
    };

    if nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), None).is_err() {
        println!("Status: not running (stale pid {pid})");
        return Ok(());
    }

    println!("Status: running (pid {pid})");
    let state: Option<oss_core::WorkflowState> = oss_storage::read_json(&paths.workflow_state_json())?;
    if let Some(state) = state {
        if let Some(heartbeat) = state.daemon_heartbeat {
            println!("Last heartbeat: {}", heartbeat.to_rfc3339());
        }
        if let Some(issue) = state.issue {
            println!("Active issue: [{}] {}", issue.severity, issue.message);
        }
    }
    Ok(())
}

fn unit_file_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("could not determine the user config directory")?;
    Ok(config_dir.join("systemd/user/ossd.service"))
}

fn install(cwd: &Path) -> Result<()> {
    let exe = std::env::current_exe().context("locating own executable")?;
    let unit_path = unit_file_path()?;
    let unit_dir = unit_path.parent().context("unit path has no parent directory")?;
    std::fs::create_dir_all(unit_dir)?;

    let unit = format!(
        "[Unit]\nDescription=Developer-workflow supervisor daemon\n\n[Service]\nExecStart={} start\nWorkingDirectory={}\nRestart=on-failure\n\n[Install]\nWantedBy=default.target\n",
        exe.display(),
        cwd.display(),
    );
    let mut file = std::fs::File::create(&unit_path)?;
    file.write_all(unit.as_bytes())?;

    let reload = std::process::Command::new("systemctl").args(["--user", "daemon-reload"]).status();
    if reload.map(|s| s.success()).unwrap_or(false) {
        println!("Installed {} and reloaded systemd user units", unit_path.display());
    } else {
        println!("Installed {} (run `systemctl --user daemon-reload` manually)", unit_path.display());
    }
    Ok(())
}

fn uninstall(_cwd: &Path) -> Result<()> {
    let unit_path = unit_file_path()?;
    if unit_path.exists() {
        std::fs::remove_file(&unit_path)?;
    }
    let _ = std::process::Command::new("systemctl").args(["--user", "daemon-reload"]).status();
    println!("Removed {}", unit_path.display());
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
