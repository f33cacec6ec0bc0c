use super::*;
use oss_core::{AnomalyType, FakeClock};
use oss_engine::{generate_intervention, WorkflowIssue};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
}

impl DesktopNotifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.calls.lock().push((title.to_string(), message.to_string()));
    }
}

fn issue(confidence: f64) -> WorkflowIssue {
    WorkflowIssue {
        confidence,
        anomaly_type: AnomalyType::AgentStuck,
        title: "Agent stuck".to_string(),
        message: "No activity for 5 minutes".to_string(),
        suggested_agent: None,
        context: HashMap::new(),
    }
}

fn store() -> oss_storage::QueueStore<FakeClock> {
    let dir = tempfile::tempdir().unwrap();
    oss_storage::QueueStore::open(
        dir.path().join("queue.json"),
        dir.path().join("queue-failed.json"),
        dir.path().join("queue-expired.json"),
        50,
        FakeClock::new(),
    )
    .unwrap()
}

#[test]
fn auto_remediate_response_enqueues_a_task() {
    let mut queue = store();
    let notifier = RecordingNotifier::default();
    let response = generate_intervention(&issue(0.95));

    dispatch_response(response, "log_monitor", HashMap::new(), &mut queue, &notifier).unwrap();

    assert_eq!(queue.document().tasks.len(), 1);
    assert!(notifier.calls.lock().is_empty());
}

#[test]
fn notify_suggest_response_both_notifies_and_enqueues() {
    let mut queue = store();
    let notifier = RecordingNotifier::default();
    let response = generate_intervention(&issue(0.8));

    dispatch_response(response, "log_monitor", HashMap::new(), &mut queue, &notifier).unwrap();

    assert_eq!(queue.document().tasks.len(), 1);
    assert_eq!(notifier.calls.lock().len(), 1);
}

#[test]
fn notify_only_response_does_not_enqueue() {
    let mut queue = store();
    let notifier = RecordingNotifier::default();
    let response = generate_intervention(&issue(0.3));

    dispatch_response(response, "log_monitor", HashMap::new(), &mut queue, &notifier).unwrap();

    assert!(queue.document().tasks.is_empty());
    assert_eq!(notifier.calls.lock().len(), 1);
}
