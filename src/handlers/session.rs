// src/handlers/session.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::attempt::AttemptResult,
    session::QuizSession,
    state::{ActiveSession, SharedBoard},
};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub index: usize,
}

fn no_run() -> AppError {
    AppError::BadRequest("No quiz in progress".to_string())
}

/// Starts a run of the quiz, replacing (and discarding) any run in progress.
pub async fn start_quiz(
    State(board): State<SharedBoard>,
    State(session): State<ActiveSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = board
        .lock()
        .await
        .find_quiz(&id)
        .cloned()
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let mut active = session.lock().await;
    if let Some(previous) = active.take() {
        tracing::info!("Abandoning run of quiz {}", previous.quiz().id);
    }

    let run = QuizSession::start(quiz);
    let progress = run.progress();
    *active = Some(run);

    Ok((StatusCode::CREATED, Json(progress)))
}

/// Current question, answers so far and elapsed time.
pub async fn get_progress(State(session): State<ActiveSession>) -> Result<impl IntoResponse, AppError> {
    let active = session.lock().await;
    let run = active.as_ref().ok_or_else(no_run)?;
    Ok(Json(run.progress()))
}

pub async fn answer(
    State(session): State<ActiveSession>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let run = active.as_mut().ok_or_else(no_run)?;
    run.choose(&req.question_id, &req.answer)?;
    Ok(Json(run.progress()))
}

pub async fn move_to(
    State(session): State<ActiveSession>,
    Json(req): Json<PositionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let run = active.as_mut().ok_or_else(no_run)?;
    run.go_to(req.index)?;
    Ok(Json(run.progress()))
}

/// Steps forward one question; stays on the last one.
pub async fn next_question(State(session): State<ActiveSession>) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let run = active.as_mut().ok_or_else(no_run)?;
    run.next();
    Ok(Json(run.progress()))
}

/// Steps back one question; stays on the first one.
pub async fn previous_question(State(session): State<ActiveSession>) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let run = active.as_mut().ok_or_else(no_run)?;
    run.previous();
    Ok(Json(run.progress()))
}

pub async fn restart(State(session): State<ActiveSession>) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let run = active.as_mut().ok_or_else(no_run)?;
    run.restart();
    Ok(Json(run.progress()))
}

/// Completes the run: scores it, records the attempt for the current user and
/// returns the result.
///
/// Without a current user, or when the attempt cannot be stored, the run is
/// kept so it can be submitted again.
pub async fn submit(
    State(board): State<SharedBoard>,
    State(session): State<ActiveSession>,
) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    let mut board = board.lock().await;

    if active.is_none() {
        return Err(no_run());
    }
    if board.current_user().is_none() {
        return Err(AppError::NoActiveUser);
    }

    let run = active.take().ok_or_else(no_run)?;
    let quiz = run.quiz().clone();
    let position = run.position();
    let draft = run.finish();

    match board.add_attempt(draft.clone()).await {
        Ok(attempt) => Ok(Json(AttemptResult::new(&quiz, attempt))),
        Err(err) => {
            // Keep the answers so the run can be submitted again
            *active = Some(QuizSession::resume(quiz, position, draft));
            Err(err)
        }
    }
}

/// Drops the run in progress. Nothing is recorded.
pub async fn abandon(State(session): State<ActiveSession>) -> Result<impl IntoResponse, AppError> {
    let mut active = session.lock().await;
    if let Some(run) = active.take() {
        tracing::info!("Run of quiz {} abandoned after {}s", run.quiz().id, run.elapsed_secs());
    }
    Ok(StatusCode::NO_CONTENT)
}
