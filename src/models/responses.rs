use serde::{Deserialize, Serialize};

use crate::models::domain::BlockingPair;

/// Response for the stability check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityResponse {
    pub stable: bool,
    #[serde(rename = "blockingPair")]
    pub blocking_pair: Option<BlockingPair>,
}

/// Response listing the preset catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetListResponse {
    pub presets: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
