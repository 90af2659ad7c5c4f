use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{find_blocking_pair, score};
use crate::models::{
    HealthResponse, MatchingRequest, PresetListResponse, ProfileRequest, RandomProfileRequest,
    StabilityResponse,
};
use crate::routes::{matching_error, preset_error, validation_failed, AppState};
use crate::services::ProfileSampler;

/// Configure stateless matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matchings/evaluate", web::post().to(evaluate))
        .route("/matchings/stability", web::post().to(check_stability))
        .route("/matchings/score", web::post().to(score_matching))
        .route("/presets", web::get().to(list_presets))
        .route("/presets/{name}", web::get().to(get_preset))
        .route("/profiles/random", web::post().to(random_profile));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::trace!("Health check ({} live sessions)", state.sessions.entry_count());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Enumerate and score all stable matchings of a profile
///
/// POST /api/v1/matchings/evaluate
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "proposers": ["A", "B"],
///     "receivers": ["X", "Y"],
///     "proposerPrefs": { "A": ["X", "Y"], "B": ["X", "Y"] },
///     "receiverPrefs": { "X": ["A", "B"], "Y": ["A", "B"] }
///   }
/// }
/// ```
async fn evaluate(state: web::Data<AppState>, req: web::Json<ProfileRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.matcher.evaluate(&req.profile) {
        Ok(evaluation) => {
            tracing::info!(
                "Found {} stable matchings for n={} ({} candidates)",
                evaluation.count,
                req.profile.size(),
                evaluation.candidates_examined
            );
            HttpResponse::Ok().json(evaluation)
        }
        Err(e) => matching_error(e),
    }
}

/// Check one matching for blocking pairs
///
/// POST /api/v1/matchings/stability
async fn check_stability(
    state: web::Data<AppState>,
    req: web::Json<MatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    if let Err(e) = state.matcher.check_size(&req.profile) {
        return matching_error(e);
    }

    match find_blocking_pair(&req.matching, &req.profile) {
        Ok(blocking_pair) => HttpResponse::Ok().json(StabilityResponse {
            stable: blocking_pair.is_none(),
            blocking_pair,
        }),
        Err(e) => matching_error(e),
    }
}

/// Dissatisfaction metrics of one matching
///
/// POST /api/v1/matchings/score
async fn score_matching(
    state: web::Data<AppState>,
    req: web::Json<MatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    if let Err(e) = state.matcher.check_size(&req.profile) {
        return matching_error(e);
    }

    match score(&req.matching, &req.profile) {
        Ok(metrics) => HttpResponse::Ok().json(metrics),
        Err(e) => matching_error(e),
    }
}

async fn list_presets(state: web::Data<AppState>) -> impl Responder {
    let presets = state.presets.names();
    HttpResponse::Ok().json(PresetListResponse {
        count: presets.len(),
        presets,
    })
}

async fn get_preset(state: web::Data<AppState>, name: web::Path<String>) -> impl Responder {
    match state.presets.get(&name) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => preset_error(e),
    }
}

/// Draw a random complete profile
///
/// POST /api/v1/profiles/random
///
/// Request body:
/// ```json
/// { "size": 4, "seed": 42 }
/// ```
async fn random_profile(req: web::Json<RandomProfileRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let mut sampler = ProfileSampler::new(req.seed);
    match sampler.sample(req.size) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => matching_error(e.into()),
    }
}
