// src/handlers/user.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, models::user::SelectUserRequest, state::SharedBoard};

/// Lists all users.
pub async fn list_users(State(board): State<SharedBoard>) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    Ok(Json(board.users().to_vec()))
}

/// A user's attempt history, oldest first.
pub async fn list_user_attempts(
    State(board): State<SharedBoard>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    if board.find_user(&id).is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let attempts: Vec<_> = board.attempts_for_user(&id).into_iter().cloned().collect();
    Ok(Json(attempts))
}

/// The session's current user, or `null` when none is selected.
pub async fn get_current_user(State(board): State<SharedBoard>) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    Ok(Json(board.current_user().cloned()))
}

pub async fn select_user(
    State(board): State<SharedBoard>,
    Json(req): Json<SelectUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut board = board.lock().await;
    let user = board.select_user(&req.user_id)?;
    Ok(Json(user))
}
