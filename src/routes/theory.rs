use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::theory_dto::{SimulationRequest, SimulationResponse, TheoryQuery, TheoryResponse};
use crate::markup;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_theory(
    State(state): State<AppState>,
    Query(query): Query<TheoryQuery>,
) -> crate::error::Result<Response> {
    query.validate()?;
    let theory = state
        .theory_service
        .lesson_theory(&state.ai_service, &query.grade, &query.lesson)
        .await?;

    let nodes = markup::parse(&theory.content);
    Ok(Json(TheoryResponse {
        grade: query.grade,
        lesson_title: query.lesson,
        cached: theory.cached,
        content: theory.content,
        nodes,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn generate_simulation(
    State(state): State<AppState>,
    Json(req): Json<SimulationRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    tracing::info!("Generating simulation for lesson: {}", req.lesson_title);
    let html = state
        .theory_service
        .lesson_simulation(&state.ai_service, &req.lesson_title, req.request.as_deref())
        .await?;
    Ok(Json(SimulationResponse { html }).into_response())
}
