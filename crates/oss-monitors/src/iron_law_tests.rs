use super::*;

/// E6: three violations emit nothing, then one low-priority task, then one
/// high-priority task; a subsequent pass resets the counter so the next
/// violation again emits nothing.
#[test]
fn e6_escalation_then_reset() {
    let mut monitor = IronLawMonitor::new();

    assert!(monitor.record_violation(4, "On main branch").is_none());

    let second = monitor.record_violation(4, "On main branch").unwrap();
    assert_eq!(second.priority, Priority::Low);
    assert_eq!(second.anomaly_type, AnomalyType::IronLawViolation);

    let third = monitor.record_violation(4, "On main branch").unwrap();
    assert_eq!(third.priority, Priority::High);
    assert_eq!(third.anomaly_type, AnomalyType::IronLawRepeated);
    assert!(third.context.contains_key("hint"));

    monitor.record_pass(4);
    assert_eq!(monitor.violation_count(4), 0);
    assert!(monitor.record_violation(4, "On main branch").is_none());
}

#[test]
fn counters_are_independent_per_law() {
    let mut monitor = IronLawMonitor::new();
    monitor.record_violation(1, "a");
    monitor.record_violation(1, "a");
    assert!(monitor.record_violation(2, "b").is_none());
    assert_eq!(monitor.violation_count(1), 2);
    assert_eq!(monitor.violation_count(2), 1);
}
