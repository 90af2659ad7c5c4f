use std::collections::HashMap;

use crate::error::ValidationError;
use crate::models::{Matching, PreferenceProfile, Side};

/// Index form of a validated profile
///
/// Participants are numbered by their position in the profile's
/// `proposers`/`receivers` vectors. `*_prefs[i]` is participant i's list as
/// opposite-side indices, `*_rank[i][j]` is the zero-based rank i gives j.
#[derive(Debug, Clone)]
pub struct RankTable {
    proposers: Vec<String>,
    receivers: Vec<String>,
    proposer_index: HashMap<String, usize>,
    receiver_index: HashMap<String, usize>,
    proposer_prefs: Vec<Vec<usize>>,
    receiver_prefs: Vec<Vec<usize>>,
    proposer_rank: Vec<Vec<usize>>,
    receiver_rank: Vec<Vec<usize>>,
}

impl RankTable {
    /// Validate `profile` and build its rank table
    pub fn build(profile: &PreferenceProfile) -> Result<Self, ValidationError> {
        let n = profile.proposers.len();
        if n == 0 && profile.receivers.is_empty() {
            return Err(ValidationError::EmptyProfile);
        }
        if n != profile.receivers.len() {
            return Err(ValidationError::SizeMismatch {
                proposers: n,
                receivers: profile.receivers.len(),
            });
        }

        let proposer_index = index_participants(&profile.proposers, None)?;
        let receiver_index = index_participants(&profile.receivers, Some(&proposer_index))?;

        for side in [Side::Proposer, Side::Receiver] {
            let declared = match side {
                Side::Proposer => &proposer_index,
                Side::Receiver => &receiver_index,
            };
            if let Some(key) = profile.lists(side).keys().find(|k| !declared.contains_key(*k)) {
                return Err(ValidationError::UnexpectedList {
                    side,
                    participant: key.clone(),
                });
            }
        }

        let proposer_prefs = index_lists(profile, Side::Proposer, &receiver_index)?;
        let receiver_prefs = index_lists(profile, Side::Receiver, &proposer_index)?;
        let proposer_rank = proposer_prefs.iter().map(|list| invert(list)).collect();
        let receiver_rank = receiver_prefs.iter().map(|list| invert(list)).collect();

        Ok(Self {
            proposers: profile.proposers.clone(),
            receivers: profile.receivers.clone(),
            proposer_index,
            receiver_index,
            proposer_prefs,
            receiver_prefs,
            proposer_rank,
            receiver_rank,
        })
    }

    /// Participants per side
    #[inline]
    pub fn size(&self) -> usize {
        self.proposers.len()
    }

    pub fn proposer(&self, p: usize) -> &str {
        &self.proposers[p]
    }

    pub fn receiver(&self, r: usize) -> &str {
        &self.receivers[r]
    }

    /// Rank proposer `p` gives receiver `r`
    #[inline]
    pub fn proposer_rank(&self, p: usize, r: usize) -> usize {
        self.proposer_rank[p][r]
    }

    /// Rank receiver `r` gives proposer `p`
    #[inline]
    pub fn receiver_rank(&self, r: usize, p: usize) -> usize {
        self.receiver_rank[r][p]
    }

    #[inline]
    pub fn proposer_prefs(&self, p: usize) -> &[usize] {
        &self.proposer_prefs[p]
    }

    #[inline]
    pub fn receiver_prefs(&self, r: usize) -> &[usize] {
        &self.receiver_prefs[r]
    }

    /// Convert a matching to `assignment[p] = r`, rejecting anything that is
    /// not a bijection over this table's participants.
    pub fn assignment_of(&self, matching: &Matching) -> Result<Vec<usize>, ValidationError> {
        let n = self.size();
        if matching.len() != n {
            return Err(ValidationError::MatchingSize {
                expected: n,
                actual: matching.len(),
            });
        }

        let mut assignment = vec![None; n];
        let mut taken = vec![false; n];
        for pair in matching.iter() {
            let p = *self.proposer_index.get(&pair.proposer).ok_or_else(|| {
                ValidationError::UnknownMatchParticipant {
                    side: Side::Proposer,
                    participant: pair.proposer.clone(),
                }
            })?;
            let r = *self.receiver_index.get(&pair.receiver).ok_or_else(|| {
                ValidationError::UnknownMatchParticipant {
                    side: Side::Receiver,
                    participant: pair.receiver.clone(),
                }
            })?;

            if assignment[p].is_some() {
                return Err(ValidationError::DuplicatePairing(pair.proposer.clone()));
            }
            if taken[r] {
                return Err(ValidationError::DuplicatePairing(pair.receiver.clone()));
            }
            assignment[p] = Some(r);
            taken[r] = true;
        }

        // n distinct proposers were assigned, so every slot is filled
        Ok(assignment.into_iter().flatten().collect())
    }

    /// Build the named matching for `assignment`, in proposer order
    pub fn matching_from(&self, assignment: &[usize]) -> Matching {
        Matching::from_pairs(
            assignment
                .iter()
                .enumerate()
                .map(|(p, &r)| (self.proposers[p].clone(), self.receivers[r].clone())),
        )
    }
}

fn index_participants(
    ids: &[String],
    other_side: Option<&HashMap<String, usize>>,
) -> Result<HashMap<String, usize>, ValidationError> {
    let mut index = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        let clashes = other_side.map_or(false, |other| other.contains_key(id));
        if clashes || index.insert(id.clone(), i).is_some() {
            return Err(ValidationError::DuplicateParticipant(id.clone()));
        }
    }
    Ok(index)
}

fn index_lists(
    profile: &PreferenceProfile,
    side: Side,
    opposite: &HashMap<String, usize>,
) -> Result<Vec<Vec<usize>>, ValidationError> {
    let lists = profile.lists(side);
    profile
        .participants(side)
        .iter()
        .map(|participant| {
            let list = lists
                .get(participant)
                .ok_or_else(|| ValidationError::MissingList {
                    side,
                    participant: participant.clone(),
                })?;
            index_list(participant, list, opposite)
        })
        .collect()
}

/// Check one list is a permutation of the opposite side and convert it
pub(crate) fn index_list(
    participant: &str,
    list: &[String],
    opposite: &HashMap<String, usize>,
) -> Result<Vec<usize>, ValidationError> {
    let n = opposite.len();
    let mut seen = vec![false; n];
    let mut indices = Vec::with_capacity(n);

    for entry in list {
        let i = *opposite
            .get(entry)
            .ok_or_else(|| ValidationError::UnknownEntry {
                participant: participant.to_string(),
                entry: entry.clone(),
            })?;
        if seen[i] {
            return Err(ValidationError::DuplicateEntry {
                participant: participant.to_string(),
                entry: entry.clone(),
            });
        }
        seen[i] = true;
        indices.push(i);
    }

    // Entries are distinct and known, so only a short list can remain
    if indices.len() != n {
        return Err(ValidationError::IncompleteList {
            participant: participant.to_string(),
            expected: n,
            actual: indices.len(),
        });
    }

    Ok(indices)
}

#[inline]
fn invert(order: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; order.len()];
    for (position, &j) in order.iter().enumerate() {
        rank[j] = position;
    }
    rank
}

impl PreferenceProfile {
    /// Check every invariant a profile needs before it can be evaluated
    pub fn validate(&self) -> Result<(), ValidationError> {
        RankTable::build(self).map(|_| ())
    }

    /// True when every participant holds a full strict ranking
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn rank_table(&self) -> Result<RankTable, ValidationError> {
        RankTable::build(self)
    }

    /// Build a profile whose lists come from a caller-supplied permutation
    /// generator. `sample` receives the opposite side in declaration order
    /// and must return a permutation of it; the result is validated.
    pub fn from_sampler<F>(
        proposers: Vec<String>,
        receivers: Vec<String>,
        mut sample: F,
    ) -> Result<Self, ValidationError>
    where
        F: FnMut(&[String]) -> Vec<String>,
    {
        let mut profile = PreferenceProfile::new(proposers, receivers);
        for p in &profile.proposers {
            profile.proposer_prefs.insert(p.clone(), sample(&profile.receivers));
        }
        for r in &profile.receivers {
            profile.receiver_prefs.insert(r.clone(), sample(&profile.proposers));
        }
        profile.validate()?;
        Ok(profile)
    }
}
