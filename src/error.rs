use thiserror::Error;

use crate::models::Side;

/// Reasons a preference profile or a matching is rejected before any
/// stability work is done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Profile has no participants")]
    EmptyProfile,

    #[error("Side sizes differ: {proposers} proposers, {receivers} receivers")]
    SizeMismatch { proposers: usize, receivers: usize },

    #[error("Unknown participant {0}")]
    UnknownParticipant(String),

    #[error("Participant {0} is declared more than once")]
    DuplicateParticipant(String),

    #[error("No preference list for {side} {participant}")]
    MissingList { side: Side, participant: String },

    #[error("Preference list of {participant} has {actual} entries, expected {expected}")]
    IncompleteList {
        participant: String,
        expected: usize,
        actual: usize,
    },

    #[error("Preference list of {participant} ranks {entry} more than once")]
    DuplicateEntry { participant: String, entry: String },

    #[error("Preference list of {participant} names unknown participant {entry}")]
    UnknownEntry { participant: String, entry: String },

    #[error("Preference list given for undeclared {side} {participant}")]
    UnexpectedList { side: Side, participant: String },

    #[error("Matching has {actual} pairs, expected {expected}")]
    MatchingSize { expected: usize, actual: usize },

    #[error("Matching names unknown {side} {participant}")]
    UnknownMatchParticipant { side: Side, participant: String },

    #[error("Matching pairs {0} more than once")]
    DuplicatePairing(String),
}

/// Errors surfaced by the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Profile has {n} participants per side, the limit is {max}")]
    TooManyParticipants { n: usize, max: usize },
}

pub type Result<T, E = MatchingError> = std::result::Result<T, E>;
