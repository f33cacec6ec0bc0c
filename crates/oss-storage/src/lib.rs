// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistence layer: atomic JSON documents, queue/state stores, PID file.

mod archive;
mod atomic;
mod pid;
mod queue_store;
mod state_store;

pub use archive::{Archive, ArchiveDocument};
pub use atomic::{read_json, write_json};
pub use pid::{acquire as acquire_pid_file, read_pid, PidFile, PidFileError};
pub use queue_store::{QueueListener, QueueStore};
pub use state_store::StateStore;
