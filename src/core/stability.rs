use crate::core::profile::RankTable;
use crate::error::Result;
use crate::models::{BlockingPair, Matching, PreferenceProfile};

/// Check whether `matching` admits no blocking pair under `profile`
///
/// Fails with a validation error when the profile is incomplete or the
/// matching is not a bijection over the profile's participants.
pub fn is_stable(matching: &Matching, profile: &PreferenceProfile) -> Result<bool> {
    Ok(find_blocking_pair(matching, profile)?.is_none())
}

/// First blocking pair of `matching`, or `None` if it is stable
pub fn find_blocking_pair(
    matching: &Matching,
    profile: &PreferenceProfile,
) -> Result<Option<BlockingPair>> {
    let table = profile.rank_table()?;
    let assignment = table.assignment_of(matching)?;

    Ok(blocking_pair_in(&table, &assignment).map(|(p, r)| BlockingPair {
        proposer: table.proposer(p).to_string(),
        receiver: table.receiver(r).to_string(),
    }))
}

/// Stability test on an already validated assignment (`assignment[p] = r`)
#[inline]
pub(crate) fn is_stable_assignment(table: &RankTable, assignment: &[usize]) -> bool {
    blocking_pair_in(table, assignment).is_none()
}

/// Search both sides for a blocking pair, proposers first
///
/// The receiver-side pass finds nothing the proposer-side pass misses on a
/// valid table; it is kept so both directions are always checked.
pub(crate) fn blocking_pair_in(table: &RankTable, assignment: &[usize]) -> Option<(usize, usize)> {
    let n = table.size();
    let mut partner_of = vec![0; n];
    for (p, &r) in assignment.iter().enumerate() {
        partner_of[r] = p;
    }

    // Proposer p against each receiver ranked above p's partner
    for (p, &r) in assignment.iter().enumerate() {
        let current = table.proposer_rank(p, r);
        for &preferred in &table.proposer_prefs(p)[..current] {
            let rival = partner_of[preferred];
            if table.receiver_rank(preferred, p) < table.receiver_rank(preferred, rival) {
                return Some((p, preferred));
            }
        }
    }

    // Receiver r against each proposer ranked above r's partner
    for (r, &p) in partner_of.iter().enumerate() {
        let current = table.receiver_rank(r, p);
        for &preferred in &table.receiver_prefs(r)[..current] {
            let rival = assignment[preferred];
            if table.proposer_rank(preferred, r) < table.proposer_rank(preferred, rival) {
                return Some((preferred, r));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MatchingError, ValidationError};

    fn shared_taste() -> PreferenceProfile {
        PreferenceProfile::new(["A", "B"], ["X", "Y"])
            .with_list("A", ["X", "Y"])
            .with_list("B", ["X", "Y"])
            .with_list("X", ["A", "B"])
            .with_list("Y", ["A", "B"])
    }

    #[test]
    fn test_stable_matching_accepted() {
        let matching = Matching::from_pairs([("A", "X"), ("B", "Y")]);
        assert!(is_stable(&matching, &shared_taste()).unwrap());
    }

    #[test]
    fn test_blocking_pair_reported() {
        let matching = Matching::from_pairs([("A", "Y"), ("B", "X")]);
        let profile = shared_taste();

        assert!(!is_stable(&matching, &profile).unwrap());
        assert_eq!(
            find_blocking_pair(&matching, &profile).unwrap(),
            Some(BlockingPair {
                proposer: "A".to_string(),
                receiver: "X".to_string(),
            })
        );
    }

    #[test]
    fn test_pair_order_does_not_matter() {
        let matching = Matching::from_pairs([("B", "Y"), ("A", "X")]);
        assert!(is_stable(&matching, &shared_taste()).unwrap());
    }

    #[test]
    fn test_invalid_matching_is_an_error() {
        let matching = Matching::from_pairs([("A", "X"), ("B", "X")]);
        assert_eq!(
            is_stable(&matching, &shared_taste()),
            Err(MatchingError::Validation(ValidationError::DuplicatePairing(
                "X".to_string()
            )))
        );
    }

    #[test]
    fn test_incomplete_profile_is_an_error() {
        let profile = shared_taste().with_list("Y", ["A"]);
        let matching = Matching::from_pairs([("A", "X"), ("B", "Y")]);
        assert!(matches!(
            is_stable(&matching, &profile),
            Err(MatchingError::Validation(ValidationError::IncompleteList { .. }))
        ));
    }

    #[test]
    fn test_blocking_pair_indices() {
        let profile = PreferenceProfile::new(["A", "B"], ["X", "Y"])
            .with_list("A", ["Y", "X"])
            .with_list("B", ["X", "Y"])
            .with_list("X", ["B", "A"])
            .with_list("Y", ["A", "B"]);
        let table = profile.rank_table().unwrap();

        // A→X, B→Y: A prefers Y and Y prefers A
        assert_eq!(blocking_pair_in(&table, &[0, 1]), Some((0, 1)));
        assert!(is_stable_assignment(&table, &[1, 0]));
    }
}
