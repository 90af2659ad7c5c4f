use serde::{Deserialize, Serialize};

use crate::core::enumerator::stable_assignments_counted;
use crate::core::scoring::score_assignment;
use crate::error::{MatchingError, Result};
use crate::models::{PreferenceProfile, ScoredMatching};

/// Largest n accepted by default (8! = 40 320 candidates)
pub const DEFAULT_MAX_PARTICIPANTS: usize = 8;

/// Result of evaluating one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub matchings: Vec<ScoredMatching>,
    pub count: usize,
    #[serde(rename = "candidatesExamined")]
    pub candidates_examined: usize,
}

/// Enumerates and scores stable matchings, refusing profiles that are too
/// large to enumerate exhaustively.
///
/// # Pipeline Stages
/// 1. Validation and rank table construction
/// 2. Size bound
/// 3. Exhaustive enumeration with stability filtering
/// 4. Scoring and numbering
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    max_participants: usize,
}

impl Matcher {
    pub fn new(max_participants: usize) -> Self {
        Self { max_participants }
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    /// Reject profiles above the configured size without doing any work
    pub fn check_size(&self, profile: &PreferenceProfile) -> Result<()> {
        let n = profile.size();
        if n > self.max_participants {
            return Err(MatchingError::TooManyParticipants {
                n,
                max: self.max_participants,
            });
        }
        Ok(())
    }

    /// Every stable matching of `profile` with its metrics, numbered from 1
    /// in enumeration order
    pub fn evaluate(&self, profile: &PreferenceProfile) -> Result<Evaluation> {
        self.check_size(profile)?;
        let table = profile.rank_table()?;
        let (assignments, candidates_examined) = stable_assignments_counted(&table)?;

        let matchings: Vec<ScoredMatching> = assignments
            .iter()
            .enumerate()
            .map(|(i, assignment)| ScoredMatching {
                index: i + 1,
                matching: table.matching_from(assignment),
                metrics: score_assignment(&table, assignment),
            })
            .collect();

        Ok(Evaluation {
            count: matchings.len(),
            matchings,
            candidates_examined,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARTICIPANTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::Matching;

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
    fn test_evaluate_rotation() {
        let evaluation = Matcher::default().evaluate(&rotation()).unwrap();

        assert_eq!(evaluation.count, 3);
        assert_eq!(evaluation.candidates_examined, 6);

        let indices: Vec<usize> = evaluation.matchings.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);

        let first = &evaluation.matchings[0];
        assert_eq!(
            first.matching,
            Matching::from_pairs([("A", "X"), ("B", "Y"), ("C", "Z")])
        );
        assert_eq!(first.metrics.total, 6);
    }

    #[test]
    fn test_size_bound() {
        let matcher = Matcher::new(2);
        assert_eq!(
            matcher.evaluate(&rotation()),
            Err(MatchingError::TooManyParticipants { n: 3, max: 2 })
        );
    }

    #[test]
    fn test_validation_before_enumeration() {
        let profile = rotation().with_list("Z", ["A", "B"]);
        assert!(matches!(
            Matcher::default().evaluate(&profile),
            Err(MatchingError::Validation(ValidationError::IncompleteList { .. }))
        ));
    }
}
