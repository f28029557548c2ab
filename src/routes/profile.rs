use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::profile_dto::{
    ProfileUpdateRequest, SettingsRequest, SettingsResponse, StatsResponse, TheoryMinutesRequest,
};
use crate::error::Error;
use crate::services::ai_service::{API_KEY_STORE_KEY, AVAILABLE_MODELS, MODEL_STORE_KEY};
use crate::services::events::StateEvent;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_profile(State(state): State<AppState>) -> crate::error::Result<Response> {
    Ok(Json(state.profile_service.load()).into_response())
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdateRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let profile = state.profile_service.update(req)?;
    Ok(Json(profile).into_response())
}

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> crate::error::Result<Response> {
    let stats = state.stats_service.load();
    Ok(Json(StatsResponse::from(stats)).into_response())
}

/// Reading time is reported by the client when a theory view closes; it
/// also counts as the day's activity for the streak.
#[axum::debug_handler]
pub async fn record_theory_minutes(
    State(state): State<AppState>,
    Json(req): Json<TheoryMinutesRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let stats = state.stats_service.record_theory_minutes(req.minutes)?;
    Ok(Json(StatsResponse::from(stats)).into_response())
}

#[axum::debug_handler]
pub async fn get_settings(State(state): State<AppState>) -> crate::error::Result<Response> {
    Ok(Json(SettingsResponse {
        has_api_key: state.ai_service.has_api_key(),
        model: state.ai_service.preferred_model(),
    })
    .into_response())
}

/// The key itself is never echoed back, only its presence.
#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<SettingsRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    if let Some(model) = &req.model {
        if !AVAILABLE_MODELS.contains(&model.as_str()) {
            return Err(Error::BadRequest(format!("Unknown model: {}", model)));
        }
        state.store.set(MODEL_STORE_KEY, model)?;
    }
    if let Some(api_key) = &req.api_key {
        let trimmed = api_key.trim();
        if trimmed.is_empty() {
            state.store.remove(API_KEY_STORE_KEY)?;
        } else {
            state.store.set(API_KEY_STORE_KEY, &trimmed)?;
        }
    }
    state.events.publish(StateEvent::SettingsUpdated);

    Ok(Json(SettingsResponse {
        has_api_key: state.ai_service.has_api_key(),
        model: state.ai_service.preferred_model(),
    })
    .into_response())
}
