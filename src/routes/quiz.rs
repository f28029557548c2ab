use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::{
    AdvanceResponse, AnswerRequest, QuizSessionResponse, QuizStatusResponse, StartQuizRequest,
    StepResponse,
};
use crate::services::quiz_service::QuizAdvance;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_quiz(
    State(state): State<AppState>,
    Json(req): Json<StartQuizRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    tracing::info!(
        "Generating quiz for lesson: {} (grade {})",
        req.lesson_title,
        req.grade
    );
    let session = state
        .quiz_service
        .start(&state.ai_service, req.grade, req.lesson_title)
        .await?;
    Ok(Json(QuizSessionResponse::from(&session)).into_response())
}

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let session = state.quiz_service.snapshot(id)?;
    Ok(Json(QuizStatusResponse::from(&session)).into_response())
}

#[axum::debug_handler]
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let (outcome, session) = state.quiz_service.answer(id, req.answer)?;
    Ok(Json(StepResponse::new(outcome, &session)).into_response())
}

#[axum::debug_handler]
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let (outcome, session) = state.quiz_service.confirm(id)?;
    Ok(Json(StepResponse::new(outcome, &session)).into_response())
}

#[axum::debug_handler]
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let step = state.quiz_service.advance(id, &state.stats_service)?;
    let body = match step {
        QuizAdvance::Next(current_index) => AdvanceResponse::Active { current_index },
        QuizAdvance::Finished(result) => {
            tracing::info!(
                "Quiz finished: score={}/{} in {}s",
                result.score,
                result.total,
                result.elapsed_seconds
            );
            AdvanceResponse::Result {
                score: result.score,
                total: result.total,
                normalized_score: result.normalized_score,
                elapsed_seconds: result.elapsed_seconds,
            }
        }
    };
    Ok(Json(body).into_response())
}

#[axum::debug_handler]
pub async fn retry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let session = state.quiz_service.retry(id)?;
    Ok(Json(QuizSessionResponse::from(&session)).into_response())
}

#[axum::debug_handler]
pub async fn discard_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    state.quiz_service.discard(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
