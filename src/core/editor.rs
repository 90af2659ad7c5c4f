use std::collections::HashMap;

use crate::core::profile::index_list;
use crate::error::ValidationError;
use crate::models::{PreferenceProfile, Side};

/// Result of an edit: the profile to keep and, if the edit was dropped, why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub profile: PreferenceProfile,
    pub rejection: Option<ValidationError>,
}

impl EditOutcome {
    pub fn committed(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Check that `candidate` is a full ranking of the opposite side of
/// `participant`, returning that participant's side.
pub fn check_candidate(
    profile: &PreferenceProfile,
    participant: &str,
    candidate: &[String],
) -> Result<Side, ValidationError> {
    let side = profile
        .side_of(participant)
        .ok_or_else(|| ValidationError::UnknownParticipant(participant.to_string()))?;

    let opposite: HashMap<String, usize> = profile
        .participants(side.opposite())
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    index_list(participant, candidate, &opposite)?;
    Ok(side)
}

/// Replace one preference list, committing only complete rankings
///
/// A candidate that is short, long, repeats an entry or names an unknown
/// participant leaves the profile untouched. Partial selections are normal
/// while a list is being edited, so this is not an error.
pub fn apply_edit(profile: &PreferenceProfile, participant: &str, candidate: &[String]) -> EditOutcome {
    match check_candidate(profile, participant, candidate) {
        Ok(side) => {
            let mut updated = profile.clone();
            updated
                .lists_mut(side)
                .insert(participant.to_string(), candidate.to_vec());
            EditOutcome {
                profile: updated,
                rejection: None,
            }
        }
        Err(rejection) => {
            tracing::debug!("Edit for {} not committed: {}", participant, rejection);
            EditOutcome {
                profile: profile.clone(),
                rejection: Some(rejection),
            }
        }
    }
}

/// `apply_edit` without the rejection reason
pub fn update_preference_list(
    profile: &PreferenceProfile,
    participant: &str,
    candidate: &[String],
) -> PreferenceProfile {
    apply_edit(profile, participant, candidate).profile
}
