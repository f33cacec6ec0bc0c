use super::*;
use chrono::{Duration, TimeZone};

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
}

#[test]
fn ring_buffer_evicts_oldest_beyond_capacity() {
    let mut monitor = LogMonitor::new(2);
    monitor.ingest("a", at(0));
    monitor.ingest("b", at(1));
    monitor.ingest("c", at(2));
    assert_eq!(monitor.lines().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn matching_line_dispatches_to_the_rule_engine() {
    let mut monitor = LogMonitor::new(DEFAULT_CAPACITY);
    let m = monitor.ingest("❌ LAW #2: skipped tests", at(0));
    assert!(m.is_some());
}

#[test]
fn stuck_window_emits_once_until_new_activity() {
    let mut monitor = LogMonitor::new(DEFAULT_CAPACITY);
    monitor.ingest("session started", at(0));

    assert!(monitor.check_and_report_stuck(60, at(59)).is_none());
    let first = monitor.check_and_report_stuck(60, at(61));
    assert!(first.is_some());
    let second = monitor.check_and_report_stuck(60, at(62));
    assert!(second.is_none(), "de-duped until a new line arrives");

    monitor.ingest("new activity", at(63));
    assert!(monitor.check_and_report_stuck(60, at(63)).is_none());
    assert!(monitor.check_and_report_stuck(60, at(200)).is_some());
}
