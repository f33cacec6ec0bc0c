// SPDX-License-Identifier: MIT

//! Persistence for `workflow-state.json` (spec.md section 4.2).
//!
//! Every mutation reads the current document, applies a function, writes
//! atomically. A missing file reads as empty; a corrupt file reads as empty
//! and is overwritten on the next write.

use crate::atomic::{read_json, write_json};
use oss_core::{SupervisorError, WorkflowState};
use std::path::PathBuf;

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn read(&self) -> Result<WorkflowState, SupervisorError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    /// Read-modify-write: apply `f` to the current document and persist it.
    pub fn mutate(
        &self,
        f: impl FnOnce(&mut WorkflowState),
    ) -> Result<WorkflowState, SupervisorError> {
        let mut state = self.read()?;
        f(&mut state);
        write_json(&self.path, &state)?;
        Ok(state)
    }
}
