use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::quiz_dto::SubmitAnswerRequest;
use crate::middleware::auth::Claims;
use crate::models::question::QuizConfig;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(config): Json<QuizConfig>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let started = state.sessions.start(user_id, config).await?;
    Ok(Json(started).into_response())
}

#[axum::debug_handler]
pub async fn current_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let current = state.sessions.current(user_id)?;
    Ok(Json(current).into_response())
}

#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let outcome = state.sessions.submit_answer(user_id, payload.answer)?;
    Ok(Json(outcome).into_response())
}

#[axum::debug_handler]
pub async fn advance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let advanced = state.sessions.advance(user_id)?;
    Ok(Json(advanced).into_response())
}

#[axum::debug_handler]
pub async fn quiz_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let status = state.sessions.status(user_id)?;
    Ok(Json(status).into_response())
}

#[axum::debug_handler]
pub async fn finalize_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let outcome = state.sessions.finalize(user_id).await?;
    Ok(Json(outcome).into_response())
}

#[axum::debug_handler]
pub async fn reset_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    state.sessions.reset(user_id)?;
    Ok(Json(serde_json::json!({ "reset": true })).into_response())
}
