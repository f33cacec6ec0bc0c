// SPDX-License-Identifier: MIT

//! Small formatting helpers shared by the CLI and logs.

use chrono::{DateTime, Utc};

/// Format a duration as "Xh Ym", "Ym Zs", or "Zs" depending on magnitude.
pub fn format_elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let secs = (to - from).num_seconds().max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
