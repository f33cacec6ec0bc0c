// SPDX-License-Identifier: MIT

//! Rule Engine: a pure `analyze(text) -> RuleMatch?` pipeline (spec.md section 4.5).
//!
//! Rules are evaluated in the order they are registered; the first match wins.
//! New rules can be appended without touching callers.

use oss_core::{AnomalyType, Priority};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Outcome of a rule matching against a log line or assistant message.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub priority: Priority,
    pub anomaly_type: AnomalyType,
    pub prompt: String,
    pub suggested_agent: Option<String>,
    pub context: HashMap<String, serde_json::Value>,
}

/// One entry in the engine's ordered rule table.
struct Rule {
    pattern: &'static Regex,
    build: fn(&regex::Captures) -> RuleMatch,
}

fn ctx(pairs: &[(&str, &str)]) -> HashMap<String, serde_json::Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}

#[allow(clippy::expect_used)]
static STUCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[daemon\]\s+\[agent_stuck\]").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static IRON_LAW_FAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)❌\s*LAW\s*#(\d+):\s*(.+)").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static CI_FAILURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[command\]\s+\[FAILED\]\s+ci\b").expect("constant regex pattern is valid"));
#[allow(clippy::expect_used)]
static PR_CHECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[command\]\s+\[FAILED\]\s+pr[-_ ]?check").expect("constant regex pattern is valid"));

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            pattern: &IRON_LAW_FAIL_RE,
            build: |caps| RuleMatch {
                priority: Priority::Low,
                anomaly_type: AnomalyType::IronLawViolation,
                prompt: format!("Iron law #{} violated: {}", &caps[1], &caps[2]),
                suggested_agent: None,
                context: ctx(&[("law", &caps[1])]),
            },
        },
        Rule {
            pattern: &CI_FAILURE_RE,
            build: |_| RuleMatch {
                priority: Priority::High,
                anomaly_type: AnomalyType::CiFailure,
                prompt: "CI run failed".to_string(),
                suggested_agent: None,
                context: HashMap::new(),
            },
        },
        Rule {
            pattern: &PR_CHECK_RE,
            build: |_| RuleMatch {
                priority: Priority::High,
                anomaly_type: AnomalyType::PrCheckFailed,
                prompt: "PR check failed".to_string(),
                suggested_agent: None,
                context: HashMap::new(),
            },
        },
        Rule {
            pattern: &STUCK_RE,
            build: |_| RuleMatch {
                priority: Priority::Medium,
                anomaly_type: AnomalyType::AgentStuck,
                prompt: "Agent appears stuck".to_string(),
                suggested_agent: None,
                context: HashMap::new(),
            },
        },
    ]
});

/// Run every registered rule against `text`, returning the first match.
pub fn analyze(text: &str) -> Option<RuleMatch> {
    RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(text)
            .map(|caps| (rule.build)(&caps))
    })
}

#[cfg(test)]
#[path = "rule_engine_tests.rs"]
mod tests;
