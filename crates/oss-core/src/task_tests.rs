use super::*;
use std::collections::HashMap;

fn input(priority: Priority) -> TaskInput {
    TaskInput {
        priority,
        source: "test".into(),
        anomaly_type: AnomalyType::AgentStuck,
        prompt: "do the thing".into(),
        suggested_agent: None,
        context: HashMap::new(),
    }
}

#[test]
fn order_key_sorts_priority_before_age() {
    let t1 = Task::new(input(Priority::Low), TaskId::new(), DateTime::UNIX_EPOCH);
    let t2 = Task::new(
        input(Priority::Critical),
        TaskId::new(),
        DateTime::UNIX_EPOCH + chrono::Duration::seconds(10),
    );
    assert!(t2.order_key() < t1.order_key());
}

#[test]
fn terminal_statuses() {
    assert!(TaskStatus::Completed.is_terminal());
    assert!(TaskStatus::Failed.is_terminal());
    assert!(!TaskStatus::Pending.is_terminal());
    assert!(!TaskStatus::InProgress.is_terminal());
}
