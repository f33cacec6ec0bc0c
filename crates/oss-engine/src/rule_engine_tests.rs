use super::*;

#[test]
fn iron_law_failure_matches_with_law_number() {
    let m = analyze("❌ LAW #4: On main branch").unwrap();
    assert_eq!(m.anomaly_type, AnomalyType::IronLawViolation);
    assert_eq!(m.priority, Priority::Low);
    assert_eq!(m.context.get("law").and_then(|v| v.as_str()), Some("4"));
}

#[test]
fn ci_failure_line_matches() {
    let m = analyze("[12:00:00] [command] [FAILED] ci run").unwrap();
    assert_eq!(m.anomaly_type, AnomalyType::CiFailure);
    assert_eq!(m.priority, Priority::High);
}

#[test]
fn unmatched_text_returns_none() {
    assert!(analyze("[12:00:00] [session] [START] routine startup").is_none());
}

#[test]
fn first_match_wins_when_multiple_rules_could_apply() {
    // Iron-law pattern is checked before the generic CI pattern; a line that
    // only matches iron-law should not fall through to later rules.
    let m = analyze("❌ LAW #1: did not run tests first").unwrap();
    assert_eq!(m.anomaly_type, AnomalyType::IronLawViolation);
}
