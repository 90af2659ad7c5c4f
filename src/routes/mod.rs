// Route exports
pub mod matchings;
pub mod sessions;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::Matcher;
use crate::error::MatchingError;
use crate::models::ErrorResponse;
use crate::services::{PresetCatalog, PresetError, SessionError, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub presets: Arc<PresetCatalog>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matchings::configure)
            .configure(sessions::configure),
    );
}

pub(crate) fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };
    match status {
        404 => HttpResponse::NotFound().json(body),
        422 => HttpResponse::UnprocessableEntity().json(body),
        500 => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::warn!("Request validation failed: {}", errors);
    error_response(400, "Validation failed", errors.to_string())
}

pub(crate) fn matching_error(err: MatchingError) -> HttpResponse {
    match err {
        MatchingError::Validation(e) => {
            tracing::warn!("Rejected profile: {}", e);
            error_response(400, "Invalid profile", e.to_string())
        }
        MatchingError::TooManyParticipants { .. } => {
            tracing::warn!("{}", err);
            error_response(422, "Profile too large", err.to_string())
        }
        MatchingError::InvariantViolation(_) => {
            tracing::error!("{}", err);
            error_response(500, "Internal error", err.to_string())
        }
    }
}

pub(crate) fn session_error(err: SessionError) -> HttpResponse {
    match err {
        SessionError::NotFound(_) => error_response(404, "Session not found", err.to_string()),
        SessionError::Matching(e) => matching_error(e),
    }
}

pub(crate) fn preset_error(err: PresetError) -> HttpResponse {
    match err {
        PresetError::NotFound(_) => error_response(404, "Preset not found", err.to_string()),
        other => {
            tracing::error!("Preset catalog error: {}", other);
            error_response(500, "Preset catalog error", other.to_string())
        }
    }
}
