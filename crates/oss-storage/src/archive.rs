// SPDX-License-Identifier: MIT

//! Append-only archive documents: `queue-failed.json` and `queue-expired.json`
//! (spec.md section 3, "Queue" and section 6 filesystem layout).

use crate::atomic::{read_json, write_json};
use oss_core::{SupervisorError, Task};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveDocument {
    pub version: u64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub tasks: Vec<Task>,
}

impl ArchiveDocument {
    pub fn empty(now: chrono::DateTime<chrono::Utc>) -> Self {
        Self { version: 0, updated_at: now, tasks: Vec::new() }
    }
}

/// Append-only archive store, same shape as the live queue document.
pub struct Archive {
    path: PathBuf,
}

impl Archive {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self, now: chrono::DateTime<chrono::Utc>) -> Result<ArchiveDocument, SupervisorError> {
        Ok(read_json(&self.path)?.unwrap_or_else(|| ArchiveDocument::empty(now)))
    }

    pub fn append(&self, task: Task, now: chrono::DateTime<chrono::Utc>) -> Result<(), SupervisorError> {
        let mut doc = self.load(now)?;
        doc.tasks.push(task);
        doc.version += 1;
        doc.updated_at = now;
        write_json(&self.path, &doc)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
