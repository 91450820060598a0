// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::AppError,
    models::quiz::{PublicQuiz, QuizDraft, QuizSummary},
    state::SharedBoard,
};

/// Query parameters for browsing the catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    /// Search term matched against title and description.
    pub q: Option<String>,
    /// Comma-separated tags; a quiz matches if it carries any of them.
    pub tags: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub items: Vec<QuizSummary>,
    pub total_matching: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Lists one page of the catalog, filtered by search term and tags.
pub async fn list_quizzes(
    State(board): State<SharedBoard>,
    State(config): State<Config>,
    Query(params): Query<CatalogParams>,
) -> Result<impl IntoResponse, AppError> {
    let tags = params.tags.as_deref().map(split_tags).unwrap_or_default();
    let board = board.lock().await;

    let page = board.catalog(
        params.q.as_deref().unwrap_or(""),
        &tags,
        params.page.unwrap_or(1),
        params.page_size.unwrap_or(config.page_size),
    );

    Ok(Json(CatalogResponse {
        items: page.items.iter().map(|q| QuizSummary::from(*q)).collect(),
        total_matching: page.total_matching,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }))
}

/// Every tag in the catalog, for the tag filter.
pub async fn list_tags(State(board): State<SharedBoard>) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    Ok(Json(board.tags()))
}

/// Retrieves a single quiz without its answer keys.
pub async fn get_quiz(
    State(board): State<SharedBoard>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let board = board.lock().await;
    let quiz = board
        .find_quiz(&id)
        .map(PublicQuiz::from)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Creates a quiz authored by the current user.
pub async fn create_quiz(
    State(board): State<SharedBoard>,
    Json(draft): Json<QuizDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut board = board.lock().await;
    let author = board
        .current_user()
        .map(|u| u.name.clone())
        .ok_or(AppError::NoActiveUser)?;

    let quiz = board.add_quiz(draft, &author).await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}
