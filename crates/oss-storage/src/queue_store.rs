// SPDX-License-Identifier: MIT

//! Persistence for the live queue document, wiring [`oss_core::Queue`] to
//! disk plus the failed/expired archives (spec.md section 4.1).

use crate::archive::Archive;
use crate::atomic::{read_json, write_json};
use oss_core::{Clock, Queue, QueueDocument, QueueEvent, SupervisorError, TaskId, TaskInput, TaskPatch};
use std::path::PathBuf;

/// A listener invoked synchronously after every mutation. Errors/panics must
/// not roll back queue state (spec.md section 4.1); the store catches panics
/// via `std::panic::catch_unwind` so a broken listener cannot corrupt the
/// queue or abort the daemon.
pub trait QueueListener: Send + Sync {
    fn on_event(&self, event: &QueueEvent);
}

pub struct QueueStore<C: Clock> {
    path: PathBuf,
    failed: Archive,
    expired: Archive,
    queue: Queue,
    clock: C,
    listeners: Vec<Box<dyn QueueListener>>,
}

impl<C: Clock> QueueStore<C> {
    pub fn open(
        path: PathBuf,
        failed_path: PathBuf,
        expired_path: PathBuf,
        max_size: usize,
        clock: C,
    ) -> Result<Self, SupervisorError> {
        let now = clock.now();
        let doc = read_json(&path)?.unwrap_or_else(|| QueueDocument::empty(now));
        Ok(Self {
            path,
            failed: Archive::new(failed_path),
            expired: Archive::new(expired_path),
            queue: Queue::new(doc, max_size),
            clock,
            listeners: Vec::new(),
        })
    }

    pub fn add_listener(&mut self, listener: Box<dyn QueueListener>) {
        self.listeners.push(listener);
    }

    fn notify(&self, event: QueueEvent) {
        for listener in &self.listeners {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(&event);
            }));
            if result.is_err() {
                tracing::warn!("queue listener panicked; ignoring");
            }
        }
    }

    pub fn add(&mut self, input: TaskInput) -> Result<oss_core::Task, SupervisorError> {
        let (task, evicted, event) = self.queue.add(input, &self.clock);
        if let Some(evicted) = evicted {
            self.expired.append(evicted, self.clock.now())?;
        }
        self.persist()?;
        self.notify(event);
        Ok(task)
    }

    pub fn next_pending(&self) -> Option<&oss_core::Task> {
        self.queue.next_pending()
    }

    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), SupervisorError> {
        let event = self.queue.update(id, patch, &self.clock)?;
        self.persist()?;
        self.notify(event);
        Ok(())
    }

    pub fn move_to_failed(&mut self, id: TaskId, error: String) -> Result<(), SupervisorError> {
        let mut task = self
            .queue
            .take_for_failed_archive(id, &self.clock)
            .ok_or_else(|| SupervisorError::InvariantViolation(format!("no such task: {id}")))?;
        task.error = Some(error.clone());
        task.status = oss_core::TaskStatus::Failed;
        self.failed.append(task.clone(), self.clock.now())?;
        self.persist()?;
        self.notify(QueueEvent::TaskFailed { task });
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SupervisorError> {
        let event = self.queue.clear(&self.clock);
        self.persist()?;
        self.notify(event);
        Ok(())
    }

    pub fn document(&self) -> &QueueDocument {
        self.queue.document()
    }

    fn persist(&self) -> Result<(), SupervisorError> {
        write_json(&self.path, self.queue.document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oss_core::{AnomalyType, FakeClock, Priority};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn input() -> TaskInput {
        TaskInput {
            priority: Priority::Medium,
            source: "test".into(),
            anomaly_type: AnomalyType::AgentStuck,
            prompt: "p".into(),
            suggested_agent: None,
            context: HashMap::new(),
        }
    }

    struct CountingListener(Arc<AtomicUsize>);
    impl QueueListener for CountingListener {
        fn on_event(&self, _event: &QueueEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingListener;
    impl QueueListener for PanickingListener {
        fn on_event(&self, _event: &QueueEvent) {
            panic!("boom");
        }
    }

    #[test]
    fn add_persists_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let clock = FakeClock::new();
        let mut store = QueueStore::open(
            dir.path().join("queue.json"),
            dir.path().join("queue-failed.json"),
            dir.path().join("queue-expired.json"),
            50,
            clock,
        )
        .unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        store.add_listener(Box::new(CountingListener(counter.clone())));
        store.add(input()).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(dir.path().join("queue.json").exists());
    }

    #[test]
    fn listener_panic_does_not_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let clock = FakeClock::new();
        let mut store = QueueStore::open(
            dir.path().join("queue.json"),
            dir.path().join("queue-failed.json"),
            dir.path().join("queue-expired.json"),
            50,
            clock,
        )
        .unwrap();
        store.add_listener(Box::new(PanickingListener));
        store.add(input()).unwrap();
        assert_eq!(store.document().tasks.len(), 1);
    }

    #[test]
    fn move_to_failed_appends_to_archive() {
        let dir = tempfile::tempdir().unwrap();
        let clock = FakeClock::new();
        let mut store = QueueStore::open(
            dir.path().join("queue.json"),
            dir.path().join("queue-failed.json"),
            dir.path().join("queue-expired.json"),
            50,
            clock.clone(),
        )
        .unwrap();
        let task = store.add(input()).unwrap();
        store.move_to_failed(task.id, "boom".into()).unwrap();
        assert!(store.document().tasks.is_empty());
        let archive = Archive::new(dir.path().join("queue-failed.json"));
        let doc = archive.load(clock.now()).unwrap();
        assert_eq!(doc.tasks.len(), 1);
    }
}
