// SPDX-License-Identifier: MIT

//! Atomic JSON file persistence (spec.md section 9, "File-based IPC as the
//! concurrency substrate").
//!
//! Every document owned by the core (queue, archives, workflow state, PR
//! monitor state, usage) goes through `write_json`/`read_json`. Writers
//! serialize to a sibling temp path and rename over the live file, so readers
//! never observe a partial write (spec.md testable property 4).

use oss_core::SupervisorError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Write `value` to `path` atomically: serialize to `<path>.tmp`, then
/// rename over `path`. The rename is a single filesystem operation, so a
/// concurrent reader either sees the old file or the new one, never a mix.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SupervisorError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Read and deserialize `path`. A missing file yields `Ok(None)`. A corrupt
/// (non-JSON) file is treated as absent — callers overwrite it on next write
/// rather than failing (spec.md section 4.2, "Corrupt file yields empty read").
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SupervisorError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt JSON document, treating as empty");
            Ok(None)
        }
    }
}
