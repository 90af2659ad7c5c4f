use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::domain::{Matching, PreferenceProfile};

/// Request carrying a profile to evaluate or store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(custom(function = "validate_profile_shape"))]
    pub profile: PreferenceProfile,
}

/// Request to check or score one matching against a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchingRequest {
    #[validate(custom(function = "validate_profile_shape"))]
    pub profile: PreferenceProfile,
    pub matching: Matching,
}

/// Request for a sampled profile of `size` participants per side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RandomProfileRequest {
    #[validate(range(min = 1, max = 13))]
    pub size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request to open a session
///
/// At most one of `profile`, `preset` and `random` is used, in that order.
/// With none of them the session starts from the first preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub profile: Option<PreferenceProfile>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub preset: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub random: Option<RandomProfileRequest>,
}

/// Request to replace one participant's preference list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1))]
    pub participant: String,
    pub preferences: Vec<String>,
}

/// Cheap structural check; full validation happens in the engine
fn validate_profile_shape(profile: &PreferenceProfile) -> Result<(), ValidationError> {
    if profile.proposers.is_empty() || profile.receivers.is_empty() {
        let mut error = ValidationError::new("empty_profile");
        error.message = Some(Cow::from("profile must declare proposers and receivers"));
        return Err(error);
    }
    if profile.proposers.len() != profile.receivers.len() {
        let mut error = ValidationError::new("size_mismatch");
        error.message = Some(Cow::from(format!(
            "{} proposers but {} receivers",
            profile.proposers.len(),
            profile.receivers.len()
        )));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_request_shape() {
        let ok = ProfileRequest {
            profile: PreferenceProfile::new(["A"], ["X"]),
        };
        assert!(ok.validate().is_ok());

        let lopsided = ProfileRequest {
            profile: PreferenceProfile::new(["A", "B"], ["X"]),
        };
        assert!(lopsided.validate().is_err());

        let empty = ProfileRequest {
            profile: PreferenceProfile::default(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_random_request_range() {
        assert!(RandomProfileRequest { size: 4, seed: None }.validate().is_ok());
        assert!(RandomProfileRequest { size: 0, seed: None }.validate().is_err());
        assert!(RandomProfileRequest { size: 14, seed: Some(1) }.validate().is_err());
    }

    #[test]
    fn test_create_session_defaults() {
        let req: CreateSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.profile.is_none() && req.preset.is_none() && req.random.is_none());
        assert!(req.validate().is_ok());

        let req = CreateSessionRequest {
            random: Some(RandomProfileRequest { size: 40, seed: None }),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
