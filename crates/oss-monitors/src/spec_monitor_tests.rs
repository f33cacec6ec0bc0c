use super::*;

fn item(id: &str, status: ItemStatus) -> SpecItem {
    SpecItem { id: id.to_string(), description: String::new(), status }
}

/// Property 11: coverage.ratio == implemented/total when total>0, and 1.0
/// when total=0.
#[test]
fn coverage_ratio_matches_implemented_over_total() {
    let section = SpecSection { items: vec![item("c1", ItemStatus::Checked), item("c2", ItemStatus::Unchecked)] };
    let coverage = section_coverage(&section);
    assert_eq!(coverage.implemented, 1);
    assert_eq!(coverage.total, 2);
    assert_eq!(coverage.ratio(), 0.5);
}

#[test]
fn coverage_ratio_is_one_for_empty_section() {
    let coverage = section_coverage(&SpecSection::default());
    assert_eq!(coverage.ratio(), 1.0);
}

#[test]
fn structural_missing_flags_components_with_no_file() {
    let section = SpecSection { items: vec![item("queue_manager", ItemStatus::Checked)] };
    let files = vec!["src/other.rs".to_string()];
    let tasks = structural_missing(&section, &files);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].anomaly_type, AnomalyType::SpecDriftStructural);
    assert_eq!(tasks[0].priority, Priority::High);
}

#[test]
fn structural_extra_flags_files_with_no_spec_item() {
    let section = SpecSection { items: vec![item("queue_manager", ItemStatus::Checked)] };
    let files = vec!["src/queue_manager.rs".to_string(), "src/rogue.rs".to_string()];
    let tasks = structural_extra(&section, &files);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].context.get("file").and_then(|v| v.as_str()), Some("src/rogue.rs"));
}

#[test]
fn criteria_incomplete_excludes_checked_and_covered_items() {
    let section = SpecSection {
        items: vec![
            item("crit-1", ItemStatus::Unchecked),
            item("crit-2", ItemStatus::Unchecked),
            item("crit-3", ItemStatus::Checked),
        ],
    };
    let test_files = vec![("tests/a.rs".to_string(), "covers crit-1 fully".to_string())];
    let tasks = criteria_incomplete(&section, &test_files);
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].prompt.contains("crit-2"));
    assert_eq!(tasks[0].priority, Priority::Medium);
}
