//! Unit tests for the filter and search pipeline.

use microcycle::search::{apply_filters, apply_filters_with, FilterState, FuzzyMatcher};

use crate::common::fixture_index;

fn ids(filters: &FilterState) -> Vec<String> {
    apply_filters(&fixture_index(), filters)
        .iter()
        .map(|e| e.variant.id.clone())
        .collect()
}

#[test]
fn test_only_vbt_never_returns_non_vbt() {
    let index = fixture_index();
    let filters = FilterState::default().only_vbt();

    let result = apply_filters(&index, &filters);
    assert!(!result.is_empty());
    assert!(result.iter().all(|e| e.variant.vbt_ready));
}

#[test]
fn test_low_risk_keeps_bajo_only() {
    assert_eq!(
        ids(&FilterState::default().low_risk()),
        vec!["hip-thrust-barra", "extension-rodilla", "kettlebell-swing"]
    );
}

#[test]
fn test_target_filter_exact_tag() {
    assert_eq!(
        ids(&FilterState::default().with_target("cuádriceps")),
        vec!["sentadilla-bulgara", "jump-squat-barra"]
    );
}

#[test]
fn test_archetype_and_vbt() {
    assert_eq!(
        ids(&FilterState::default().with_arquetipo("BISAGRA").only_vbt()),
        vec!["hip-thrust-barra", "kettlebell-swing"]
    );
}

#[test]
fn test_search_tolerates_typo() {
    let result = ids(&FilterState::default().with_search("sentadila bulgara"));
    assert_eq!(result.first().map(String::as_str), Some("sentadilla-bulgara"));
}

#[test]
fn test_search_matches_tags() {
    let result = ids(&FilterState::default().with_search("isquiosurales"));
    assert_eq!(result, vec!["kettlebell-swing"]);
}

#[test]
fn test_search_without_match_is_empty() {
    assert!(ids(&FilterState::default().with_search("press militar")).is_empty());
}

#[test]
fn test_filters_are_idempotent() {
    let index = fixture_index();
    let filters = FilterState::default().with_search("squat").low_risk();

    let first = apply_filters(&index, &filters);
    let second = apply_filters(&index, &filters);
    assert_eq!(first, second);
}

#[test]
fn test_zero_threshold_requires_exact_substring() {
    let index = fixture_index();
    let strict = FuzzyMatcher::new(0.0);

    let typo = FilterState::default().with_search("swimg");
    assert!(apply_filters_with(&index, &typo, &strict).is_empty());

    let exact = FilterState::default().with_search("swing");
    assert_eq!(apply_filters_with(&index, &exact, &strict).len(), 1);
}
