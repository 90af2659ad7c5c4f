use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ValidationError;
use crate::models::PreferenceProfile;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random preference profiles, reproducible when seeded
///
/// The engine never draws randomness itself; this is the permutation
/// generator handed to `PreferenceProfile::from_sampler`.
pub struct ProfileSampler {
    rng: StdRng,
}

impl ProfileSampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Profile of `size` participants per side with uniformly shuffled lists
    pub fn sample(&mut self, size: usize) -> Result<PreferenceProfile, ValidationError> {
        let (proposers, receivers) = participant_names(size);
        PreferenceProfile::from_sampler(proposers, receivers, |side| {
            let mut list = side.to_vec();
            list.shuffle(&mut self.rng);
            list
        })
    }
}

/// Proposers take letters from the front of the alphabet and receivers from
/// the back, e.g. A-E and V-Z for five pairs. Past 13 pairs both sides fall
/// back to numbered names.
pub fn participant_names(size: usize) -> (Vec<String>, Vec<String>) {
    if size * 2 <= ALPHABET.len() {
        let letter = |b: &u8| (*b as char).to_string();
        let proposers = ALPHABET[..size].iter().map(letter).collect();
        let receivers = ALPHABET[ALPHABET.len() - size..].iter().map(letter).collect();
        (proposers, receivers)
    } else {
        let proposers = (1..=size).map(|i| format!("P{}", i)).collect();
        let receivers = (1..=size).map(|i| format!("R{}", i)).collect();
        (proposers, receivers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_names() {
        let (proposers, receivers) = participant_names(5);
        assert_eq!(proposers, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(receivers, vec!["V", "W", "X", "Y", "Z"]);

        let (proposers, receivers) = participant_names(14);
        assert_eq!(proposers[0], "P1");
        assert_eq!(receivers[13], "R14");
    }

    #[test]
    fn test_sample_is_complete() {
        let profile = ProfileSampler::new(Some(7)).sample(4).unwrap();
        assert!(profile.is_complete());
        assert_eq!(profile.size(), 4);
    }

    #[test]
    fn test_seeded_samples_repeat() {
        let first = ProfileSampler::new(Some(42)).sample(5).unwrap();
        let second = ProfileSampler::new(Some(42)).sample(5).unwrap();
        assert_eq!(first, second);
    }
}
