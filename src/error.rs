// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Every core command surfaces one of these to its immediate caller.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error (store failures)
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found: a referenced quiz or user does not exist
    NotFound(String),

    // 409 Conflict: a command that needs a current user was issued without one
    NoActiveUser,

    // 400 Bad Request: blank title or no usable questions
    EmptyQuizSubmission(String),

    // 422 Unprocessable Entity: answer key breaks the question type's rules
    InvalidQuestion(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::NoActiveUser => write!(f, "no user selected"),
            AppError::EmptyQuizSubmission(msg) => write!(f, "empty quiz: {}", msg),
            AppError::InvalidQuestion(msg) => write!(f, "invalid question: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::NoActiveUser => (
                StatusCode::CONFLICT,
                "Select a user before continuing".to_string(),
            ),
            AppError::EmptyQuizSubmission(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidQuestion(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on store queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
