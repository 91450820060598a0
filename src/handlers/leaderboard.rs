// src/handlers/leaderboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, state::SharedBoard};

/// Users ranked by total points, with recent and best percentages.
pub async fn get_leaderboard(State(board): State<SharedBoard>) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    Ok(Json(board.leaderboard()))
}
