// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Monitors: cheap periodic observers that either emit a task via the queue
//! manager or return an issue for the daemon's tick to display (spec.md
//! section 4.4).

pub mod error;
pub mod git;
pub mod health_check;
pub mod hung_process;
pub mod iron_law;
pub mod log_monitor;
pub mod process;
pub mod resource;
pub mod spec_monitor;
pub mod tdd;
pub mod test_monitor;

pub use error::MonitorError;
pub use iron_law::IronLawMonitor;
pub use log_monitor::LogMonitor;
