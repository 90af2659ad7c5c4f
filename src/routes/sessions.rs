use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateSessionRequest, PreferenceProfile, UpdatePreferencesRequest};
use crate::routes::{
    error_response, matching_error, preset_error, session_error, validation_failed, AppState,
};
use crate::services::ProfileSampler;

/// Configure session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/profile", web::put().to(replace_profile))
        .route("/sessions/{id}/preferences", web::put().to(update_preferences))
        .route("/sessions/{id}/matchings", web::get().to(session_matchings));
}

/// Pick the profile a session request asks for: an explicit profile, then a
/// preset, then a random draw, then the first preset.
fn resolve_profile(
    state: &AppState,
    req: &CreateSessionRequest,
) -> Result<PreferenceProfile, HttpResponse> {
    if let Some(profile) = &req.profile {
        return Ok(profile.clone());
    }

    if let Some(name) = &req.preset {
        return state.presets.get(name).cloned().map_err(preset_error);
    }

    if let Some(random) = &req.random {
        return ProfileSampler::new(random.seed)
            .sample(random.size)
            .map_err(|e| matching_error(e.into()));
    }

    state.presets.first().cloned().ok_or_else(|| {
        tracing::error!("Preset catalog is empty, cannot seed session");
        error_response(500, "Preset catalog error", "no presets available".to_string())
    })
}

/// Open a session
///
/// POST /api/v1/sessions
///
/// Request body (all fields optional):
/// ```json
/// {
///   "profile": { ... },
///   "preset": "n3-rotation",
///   "random": { "size": 4, "seed": 42 }
/// }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    req: web::Json<CreateSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let profile = match resolve_profile(&state, &req) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    match state.sessions.create(profile).await {
        Ok(session) => {
            tracing::info!("Opened session {} (n={})", session.id, session.profile.size());
            HttpResponse::Created().json(session)
        }
        Err(e) => session_error(e),
    }
}

async fn get_session(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    match state.sessions.get(id.into_inner()).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => session_error(e),
    }
}

async fn delete_session(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    match state.sessions.remove(id.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => session_error(e),
    }
}

/// Replace the whole profile of a session
///
/// PUT /api/v1/sessions/{id}/profile
///
/// Takes the same body as session creation.
async fn replace_profile(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<CreateSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let profile = match resolve_profile(&state, &req) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    match state.sessions.replace_profile(id.into_inner(), profile).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => session_error(e),
    }
}

/// Replace one participant's preference list
///
/// PUT /api/v1/sessions/{id}/preferences
///
/// Request body:
/// ```json
/// { "participant": "A", "preferences": ["Y", "X"] }
/// ```
///
/// Lists that are not a full ranking are not stored; the response reports
/// `committed: false` with the reason and the unchanged session.
async fn update_preferences(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<UpdatePreferencesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .sessions
        .update_preferences(id.into_inner(), &req.participant, &req.preferences)
        .await
    {
        Ok(edit) => HttpResponse::Ok().json(serde_json::json!({
            "committed": edit.rejection.is_none(),
            "reason": edit.rejection.map(|r| r.to_string()),
            "session": edit.session,
        })),
        Err(e) => session_error(e),
    }
}

/// All stable matchings of a session's current profile
///
/// GET /api/v1/sessions/{id}/matchings
async fn session_matchings(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    let id = id.into_inner();
    match state.sessions.evaluate(id).await {
        Ok(evaluation) => {
            tracing::info!("Session {}: {} stable matchings", id, evaluation.count);
            HttpResponse::Ok().json(evaluation)
        }
        Err(e) => session_error(e),
    }
}
