use crate::core::profile::RankTable;
use crate::error::Result;
use crate::models::{DissatisfactionMetrics, Matching, PreferenceProfile};

/// Compute the dissatisfaction metrics of `matching` under `profile`
///
/// Metrics:
/// proposer_score = Σ rank(p, M(p))
/// receiver_score = Σ rank(r, M⁻¹(r))
/// total          = proposer_score + receiver_score
/// imbalance      = |proposer_score - receiver_score|
/// worst_rank     = largest single rank on either side
pub fn score(matching: &Matching, profile: &PreferenceProfile) -> Result<DissatisfactionMetrics> {
    let table = profile.rank_table()?;
    let assignment = table.assignment_of(matching)?;
    Ok(score_assignment(&table, &assignment))
}

pub(crate) fn score_assignment(table: &RankTable, assignment: &[usize]) -> DissatisfactionMetrics {
    let mut proposer_score = 0;
    let mut receiver_score = 0;
    let mut worst_rank = 0;

    for (p, &r) in assignment.iter().enumerate() {
        let proposer_rank = table.proposer_rank(p, r);
        let receiver_rank = table.receiver_rank(r, p);

        proposer_score += proposer_rank;
        receiver_score += receiver_rank;
        worst_rank = worst_rank.max(proposer_rank).max(receiver_rank);
    }

    DissatisfactionMetrics {
        proposer_score,
        receiver_score,
        total: proposer_score + receiver_score,
        imbalance: proposer_score.abs_diff(receiver_score),
        worst_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_proposer_optimal_scores() {
        let matching = Matching::from_pairs([("A", "X"), ("B", "Y"), ("C", "Z")]);
        let metrics = score(&matching, &rotation()).unwrap();

        assert_eq!(
            metrics,
            DissatisfactionMetrics {
                proposer_score: 0,
                receiver_score: 6,
                total: 6,
                imbalance: 6,
                worst_rank: 2,
            }
        );
    }

    #[test]
    fn test_middle_matching_is_balanced() {
        let matching = Matching::from_pairs([("A", "Y"), ("B", "Z"), ("C", "X")]);
        let metrics = score(&matching, &rotation()).unwrap();

        assert_eq!(metrics.proposer_score, 3);
        assert_eq!(metrics.receiver_score, 3);
        assert_eq!(metrics.imbalance, 0);
        assert_eq!(metrics.worst_rank, 1);
    }

    #[test]
    fn test_score_rejects_partial_matching() {
        let matching = Matching::from_pairs([("A", "X")]);
        assert!(score(&matching, &rotation()).is_err());
    }
}
