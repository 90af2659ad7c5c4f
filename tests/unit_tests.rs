// Unit tests for the stable matching engine

use stable_match::core::{
    apply_edit, enumerate_stable_matchings, find_blocking_pair, is_stable, score,
    update_preference_list, Matcher, Permutations,
};
use stable_match::error::{MatchingError, ValidationError};
use stable_match::models::{BlockingPair, DissatisfactionMetrics, Matching, PreferenceProfile};

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn shared_taste() -> PreferenceProfile {
    PreferenceProfile::new(["A", "B"], ["X", "Y"])
        .with_list("A", ["X", "Y"])
        .with_list("B", ["X", "Y"])
        .with_list("X", ["A", "B"])
        .with_list("Y", ["A", "B"])
}

fn rotation() -> PreferenceProfile {
    PreferenceProfile::new(["A", "B", "C"], ["X", "Y", "Z"])
        .with_list("A", ["X", "Y", "Z"])
        .with_list("B", ["Y", "Z", "X"])
        .with_list("C", ["Z", "X", "Y"])
        .with_list("X", ["B", "C", "A"])
        .with_list("Y", ["C", "A", "B"])
        .with_list("Z", ["A", "B", "C"])
}

#[test]
fn test_shared_taste_single_stable_matching() {
    let matchings = enumerate_stable_matchings(&shared_taste()).unwrap();

    assert_eq!(matchings, vec![Matching::from_pairs([("A", "X"), ("B", "Y")])]);

    // B and Y each get their second choice
    let metrics = score(&matchings[0], &shared_taste()).unwrap();
    assert_eq!(metrics.proposer_score, 1);
    assert_eq!(metrics.receiver_score, 1);
    assert_eq!(metrics.total, 2);
    assert_eq!(metrics.imbalance, 0);
    assert_eq!(metrics.worst_rank, 1);
}

#[test]
fn test_shared_taste_alternative_is_blocked() {
    let alternative = Matching::from_pairs([("A", "Y"), ("B", "X")]);

    assert!(!is_stable(&alternative, &shared_taste()).unwrap());
    assert_eq!(
        find_blocking_pair(&alternative, &shared_taste()).unwrap(),
        Some(BlockingPair {
            proposer: "A".to_string(),
            receiver: "X".to_string(),
        })
    );
}

#[test]
fn test_rotation_has_three_stable_matchings() {
    let matchings = enumerate_stable_matchings(&rotation()).unwrap();

    assert_eq!(
        matchings,
        vec![
            Matching::from_pairs([("A", "X"), ("B", "Y"), ("C", "Z")]),
            Matching::from_pairs([("A", "Y"), ("B", "Z"), ("C", "X")]),
            Matching::from_pairs([("A", "Z"), ("B", "X"), ("C", "Y")]),
        ]
    );
}

#[test]
fn test_rotation_metrics() {
    let profile = rotation();
    let metrics: Vec<DissatisfactionMetrics> = enumerate_stable_matchings(&profile)
        .unwrap()
        .iter()
        .map(|m| score(m, &profile).unwrap())
        .collect();

    // Proposer-optimal, balanced, receiver-optimal
    assert_eq!((metrics[0].proposer_score, metrics[0].receiver_score), (0, 6));
    assert_eq!((metrics[1].proposer_score, metrics[1].receiver_score), (3, 3));
    assert_eq!((metrics[2].proposer_score, metrics[2].receiver_score), (6, 0));
    assert!(metrics.iter().all(|m| m.total == 6));
    assert_eq!(metrics[1].imbalance, 0);
}

#[test]
fn test_short_list_fails_enumeration() {
    let profile = rotation().with_list("B", ["Y", "Z"]);

    assert_eq!(
        enumerate_stable_matchings(&profile),
        Err(MatchingError::Validation(ValidationError::IncompleteList {
            participant: "B".to_string(),
            expected: 3,
            actual: 2,
        }))
    );
}

#[test]
fn test_enumeration_is_deterministic() {
    let first = enumerate_stable_matchings(&rotation()).unwrap();
    let second = enumerate_stable_matchings(&rotation().clone()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_editor_never_stores_wrong_length() {
    let profile = rotation();

    for len in 0..=5 {
        let candidate: Vec<String> = ["Z", "Y", "X", "Y", "Z"][..len]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let updated = update_preference_list(&profile, "A", &candidate);
        assert_eq!(updated.preferences("A").map(|l| l.len()), Some(3));
    }
}

#[test]
fn test_editor_then_enumerate() {
    // Giving X and Y the proposers' view collapses the lattice
    let profile = rotation();
    let profile = update_preference_list(&profile, "X", &ids(&["A", "B", "C"]));
    let outcome = apply_edit(&profile, "Y", &ids(&["B", "A", "C"]));
    assert!(outcome.committed());

    let profile = update_preference_list(&outcome.profile, "Z", &ids(&["C", "A", "B"]));
    let matchings = enumerate_stable_matchings(&profile).unwrap();
    assert_eq!(matchings, vec![Matching::from_pairs([("A", "X"), ("B", "Y"), ("C", "Z")])]);
}

#[test]
fn test_matcher_numbering_and_counts() {
    let evaluation = Matcher::default().evaluate(&rotation()).unwrap();

    assert_eq!(evaluation.count, evaluation.matchings.len());
    assert_eq!(evaluation.candidates_examined, Permutations::new(3).count());
    assert_eq!(evaluation.matchings[2].index, 3);
}
