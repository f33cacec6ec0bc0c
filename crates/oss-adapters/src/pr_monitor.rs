// SPDX-License-Identifier: MIT

//! PR Monitor (reference agent): polls open PRs, detects change-request
//! comments, and queues remediation tasks (spec.md section 4.6.1).

use oss_core::{PrRemediationContext, SuggestedAgent};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static APPROVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(lgtm|approved)\b|👍").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static CHANGE_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(fix|please|could you|should|refactor|change|update)\b").expect("constant regex pattern is valid")
});

/// A single review comment observed on a PR.
#[derive(Debug, Clone)]
pub struct ReviewComment {
    pub id: String,
    pub body: String,
    pub path: Option<String>,
    pub line: Option<u32>,
}

/// Whether `body` reads as a change request rather than an approval.
pub fn is_change_request(body: &str) -> bool {
    if APPROVAL_RE.is_match(body) {
        return false;
    }
    CHANGE_REQUEST_RE.is_match(body)
}

/// Heuristic agent suggestion based on comment content.
pub fn suggest_agent(body: &str) -> SuggestedAgent {
    let lower = body.to_lowercase();
    if lower.contains("type") || lower.contains("typescript") {
        SuggestedAgent::Typescript
    } else if lower.contains("test") {
        SuggestedAgent::Testing
    } else if lower.contains("perf") || lower.contains("slow") {
        SuggestedAgent::Performance
    } else if lower.contains("secur") || lower.contains("vuln") {
        SuggestedAgent::Security
    } else if lower.contains("refactor") || lower.contains("clean") {
        SuggestedAgent::Refactor
    } else {
        SuggestedAgent::Debugger
    }
}

/// Build the remediation context queued for an unseen change-request comment.
pub fn build_remediation_context(pr_number: u64, branch: &str, comment: &ReviewComment) -> PrRemediationContext {
    PrRemediationContext {
        pr_number,
        branch: branch.to_string(),
        path: comment.path.clone(),
        line: comment.line,
        comment_id: comment.id.clone(),
        comment_body: comment.body.clone(),
        suggested_agent: suggest_agent(&comment.body).to_string(),
    }
}

#[cfg(test)]
#[path = "pr_monitor_tests.rs"]
mod tests;
