// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BlockingPair, DissatisfactionMetrics, Matching, Pair, PreferenceProfile, ScoredMatching, Side};
pub use requests::{CreateSessionRequest, MatchingRequest, ProfileRequest, RandomProfileRequest, UpdatePreferencesRequest};
pub use responses::{ErrorResponse, HealthResponse, PresetListResponse, StabilityResponse};
