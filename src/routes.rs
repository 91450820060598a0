// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{leaderboard, quiz, session, user},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quizzes, users, session, leaderboard).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (board, active run, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:5173"),
        HeaderValue::from_static("http://127.0.0.1:5173"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/tags", get(quiz::list_tags))
        .route("/{id}", get(quiz::get_quiz));

    let user_routes = Router::new()
        .route("/", get(user::list_users))
        .route("/{id}/attempts", get(user::list_user_attempts));

    let session_routes = Router::new()
        .route("/user", get(user::get_current_user).post(user::select_user))
        .route("/quiz", get(session::get_progress).delete(session::abandon))
        .route("/quiz/answers", post(session::answer))
        .route("/quiz/position", post(session::move_to))
        .route("/quiz/next", post(session::next_question))
        .route("/quiz/previous", post(session::previous_question))
        .route("/quiz/restart", post(session::restart))
        .route("/quiz/submit", post(session::submit))
        .route("/quiz/{id}", post(session::start_quiz));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/users", user_routes)
        .nest("/api/session", session_routes)
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
