//! Stable Match - stable matching enumeration and dissatisfaction scoring
//!
//! Given two equal-size sets of participants (proposers and receivers), each
//! with a strict ranking of the other side, this library finds every perfect
//! matching with no blocking pair and scores each one by how far participants
//! are from their first choice. The engine in `core` is synchronous and
//! pure; `services` and `routes` wrap it in an HTTP service.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{enumerate_stable_matchings, is_stable, score, update_preference_list, Matcher};
pub use crate::error::{MatchingError, ValidationError};
pub use crate::models::{DissatisfactionMetrics, Matching, PreferenceProfile, ScoredMatching, Side};
