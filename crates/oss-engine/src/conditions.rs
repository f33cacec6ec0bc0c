// SPDX-License-Identifier: MIT

//! Built-in workflow chain conditions (spec.md section 4.9): pure predicates
//! over a [`oss_core::WorkflowContext`].

use oss_core::{TestResult, WorkflowContext};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static API_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bapi\b|endpoint|/v\d+/").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static DB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdatabase\b|\bschema\b|migration|\bsql\b").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static UI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bui\b|component|\bscreen\b|\bpage\b").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static CLI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcli\b|command[- ]line|subcommand").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static AUTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bauth\b|login|session token|oauth").expect("constant regex pattern is valid"));

/// Evaluate a named built-in condition. Unknown names default to `false`
/// (conservative — see spec.md section 4.9).
pub fn evaluate(name: &str, ctx: &WorkflowContext) -> bool {
    match name {
        "always" => true,
        "never" => false,
        "has_api_work" => matches_text(&API_RE, ctx),
        "has_db_work" => matches_text(&DB_RE, ctx),
        "has_ui_work" => matches_text(&UI_RE, ctx),
        "has_cli_work" => matches_text(&CLI_RE, ctx),
        "has_auth_work" => matches_text(&AUTH_RE, ctx),
        "has_test_failures" => matches!(ctx.last_test_result, Some(TestResult::Failed)),
        _ => false,
    }
}

fn matches_text(re: &Regex, ctx: &WorkflowContext) -> bool {
    if let Some(design) = &ctx.design_content {
        if re.is_match(design) {
            return true;
        }
    }
    ctx.changed_files.iter().any(|f| re.is_match(f))
}

#[cfg(test)]
#[path = "conditions_tests.rs"]
mod tests;
