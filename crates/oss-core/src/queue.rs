// SPDX-License-Identifier: MIT

//! In-memory queue document shared by the Queue Manager (spec.md section 4.1).
//!
//! This module owns ordering, bounded-size eviction, and terminal-state
//! invariants. Persistence (atomic read/write, archives) lives in
//! `oss-storage`; event delivery to listeners lives in `oss-engine`/`oss-daemon`.

use crate::clock::Clock;
use crate::error::{Result, SupervisorError};
use crate::task::{Task, TaskId, TaskInput, TaskPatch, TaskStatus};
use serde::{Deserialize, Serialize};

/// Default bound on live queue size (spec.md section 3, "Queue").
pub const DEFAULT_MAX_SIZE: usize = 50;

/// Versioned document `{version, updated_at, tasks[]}` (spec.md section 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueDocument {
    pub version: u64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub tasks: Vec<Task>,
}

impl QueueDocument {
    pub fn empty(now: chrono::DateTime<chrono::Utc>) -> Self {
        Self { version: 0, updated_at: now, tasks: Vec::new() }
    }
}

/// Events emitted by queue mutations. Listeners are synchronous and must not
/// throw; the queue swallows listener panics/errors rather than rolling back.
#[derive(Debug, Clone)]
pub enum QueueEvent {
    TaskAdded { task: Task, pending_count: usize },
    TaskCompleted { task: Task },
    TaskFailed { task: Task },
    QueueCleared,
}

/// Priority-ordered, bounded task queue (spec.md section 4.1).
///
/// Holds only the live document; overflow evicts into a separate expired
/// archive represented by the caller (`oss-storage::Archive`).
#[derive(Debug, Clone)]
pub struct Queue {
    doc: QueueDocument,
    max_size: usize,
}

impl Queue {
    pub fn new(doc: QueueDocument, max_size: usize) -> Self {
        let mut q = Self { doc, max_size };
        q.sort();
        q
    }

    pub fn document(&self) -> &QueueDocument {
        &self.doc
    }

    fn sort(&mut self) {
        self.doc.tasks.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.doc.version += 1;
        self.doc.updated_at = clock.now();
    }

    /// Insert a new task, re-sort, and enforce the size bound.
    ///
    /// Returns the new task plus any task evicted to the expired archive.
    pub fn add(
        &mut self,
        input: TaskInput,
        clock: &impl Clock,
    ) -> (Task, Option<Task>, QueueEvent) {
        let now = clock.now();
        let task = Task::new(input, TaskId::new(), now);
        self.doc.tasks.push(task.clone());
        self.sort();

        let evicted = if self.doc.tasks.len() > self.max_size {
            // Evict lowest-priority, oldest: that is the last element after sort.
            self.doc.tasks.pop().map(|mut t| {
                t.archive_reason = Some("dropped".to_string());
                t
            })
        } else {
            None
        };

        self.touch(clock);
        let pending_count =
            self.doc.tasks.iter().filter(|t| t.status == TaskStatus::Pending).count();
        (task, evicted, QueueEvent::TaskAdded { task: self.doc.tasks[0].clone(), pending_count })
    }

    /// Non-destructive: head of pending tasks by ordering.
    pub fn next_pending(&self) -> Option<&Task> {
        self.doc.tasks.iter().find(|t| t.status == TaskStatus::Pending)
    }

    /// Apply a patch to a task. Rejects mutation of a terminal task
    /// (spec.md section 8.3, `InvariantViolation`).
    pub fn update(
        &mut self,
        id: TaskId,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<QueueEvent> {
        let now = clock.now();
        let task = self
            .doc
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SupervisorError::InvariantViolation(format!("no such task: {id}")))?;

        if task.is_terminal() {
            return Err(SupervisorError::InvariantViolation(format!(
                "task {id} is already terminal"
            )));
        }

        if patch.increment_attempts {
            task.attempts += 1;
        }
        if let Some(error) = patch.error {
            task.error = Some(error);
        }

        let mut event = None;
        if let Some(status) = patch.status {
            if status == TaskStatus::Completed {
                task.completed_at = Some(now);
            }
            task.status = status;
            event = Some(match status {
                TaskStatus::Completed => QueueEvent::TaskCompleted { task: task.clone() },
                TaskStatus::Failed => QueueEvent::TaskFailed { task: task.clone() },
                _ => QueueEvent::TaskAdded { task: task.clone(), pending_count: 0 },
            });
        }

        self.touch(clock);
        Ok(event.unwrap_or(QueueEvent::TaskAdded { task: self.doc.tasks[0].clone(), pending_count: 0 }))
    }

    /// Remove a task from the live queue, returning it for archival as failed.
    pub fn take_for_failed_archive(&mut self, id: TaskId, clock: &impl Clock) -> Option<Task> {
        let idx = self.doc.tasks.iter().position(|t| t.id == id)?;
        let task = self.doc.tasks.remove(idx);
        self.touch(clock);
        Some(task)
    }

    pub fn clear(&mut self, clock: &impl Clock) -> QueueEvent {
        self.doc.tasks.clear();
        self.touch(clock);
        QueueEvent::QueueCleared
    }

    pub fn len(&self) -> usize {
        self.doc.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.tasks.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
