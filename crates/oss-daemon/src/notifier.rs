// SPDX-License-Identifier: MIT

//! Desktop notification sink for the Intervention Generator's
//! `notify_suggest`/`notify_only` responses (spec.md section 4.5).

pub trait DesktopNotifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Real desktop notifications via `notify-rust`. Errors are logged, never
/// propagated — a missing notification daemon must not break the tick loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyRustNotifier;

impl DesktopNotifier for NotifyRustNotifier {
    fn notify(&self, title: &str, message: &str) {
        if let Err(e) = notify_rust::Notification::new().summary(title).body(message).show() {
            tracing::warn!(error = %e, "failed to show desktop notification");
        }
    }
}

/// Dispatches an Intervention Generator response: queues the task (when one
/// is produced) and/or fires a desktop notification, per spec.md section 4.5.
///
/// `source`/`context` come from the originating [`oss_engine::WorkflowIssue`]
/// since `TaskInputSummary` only carries the human-readable half of it.
pub fn dispatch_response<C: oss_core::Clock>(
    response: oss_engine::Response,
    source: &str,
    context: std::collections::HashMap<String, serde_json::Value>,
    queue: &mut oss_storage::QueueStore<C>,
    notifier: &dyn DesktopNotifier,
) -> oss_core::Result<()> {
    use oss_engine::Response;

    match response {
        Response::AutoRemediate(summary) => {
            queue.add(summary.input.into_task_input(source, context))?;
        }
        Response::NotifySuggest(summary) => {
            notifier.notify(&summary.title, &summary.message);
            queue.add(summary.input.into_task_input(source, context))?;
        }
        Response::NotifyOnly { title, message } => {
            notifier.notify(&title, &message);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
