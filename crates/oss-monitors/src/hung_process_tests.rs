use super::*;
use crate::process::ProcessInfo;
use chrono::{Duration, TimeZone};
use std::sync::atomic::{AtomicBool, Ordering};

struct RecordingKiller {
    terminated: AtomicBool,
}

impl ProcessKiller for RecordingKiller {
    fn terminate(&self, _pid: u32) -> Result<(), crate::error::MonitorError> {
        self.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }
    fn kill(&self, _pid: u32) -> Result<(), crate::error::MonitorError> {
        Ok(())
    }
}

/// E4: a node vitest process running 6 minutes should_kill_process=true,
/// dry-run returns {success:true, dryRun:true} without touching the process.
#[test]
fn e4_dry_run_kill_reports_success_without_side_effects() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let p = ProcessInfo { pid: 4242, command: "node vitest run".to_string(), started_at: now - Duration::minutes(6) };
    let killer = RecordingKiller { terminated: AtomicBool::new(false) };

    let decision = decide_and_kill(&p, ProcessKind::Vitest, now, true, &killer);

    assert_eq!(decision, KillDecision { success: true, dry_run: true, pid: 4242, kind: ProcessKind::Vitest, reason: "exceeded timeout" });
    assert!(!killer.terminated.load(Ordering::SeqCst));
}

#[test]
fn live_kill_invokes_the_killer() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let p = ProcessInfo { pid: 1, command: "node vitest run".to_string(), started_at: now - Duration::minutes(6) };
    let killer = RecordingKiller { terminated: AtomicBool::new(false) };

    let decision = decide_and_kill(&p, ProcessKind::Vitest, now, false, &killer);

    assert!(decision.success);
    assert!(killer.terminated.load(Ordering::SeqCst));
}

#[test]
fn fresh_process_is_not_killed() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let p = ProcessInfo { pid: 1, command: "node vitest run".to_string(), started_at: now - Duration::minutes(1) };
    let killer = RecordingKiller { terminated: AtomicBool::new(false) };

    let decision = decide_and_kill(&p, ProcessKind::Vitest, now, false, &killer);

    assert!(!decision.success);
    assert!(!killer.terminated.load(Ordering::SeqCst));
}
