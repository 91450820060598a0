use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::{board::QuizBoard, config::Config, session::QuizSession};

/// The single board, behind one lock so commands run one at a time.
pub type SharedBoard = Arc<Mutex<QuizBoard>>;

/// The single active quiz run, if any.
pub type ActiveSession = Arc<Mutex<Option<QuizSession>>>;

#[derive(Clone)]
pub struct AppState {
    pub board: SharedBoard,
    pub session: ActiveSession,
    pub config: Config,
}

impl AppState {
    pub fn new(board: QuizBoard, config: Config) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            session: Arc::new(Mutex::new(None)),
            config,
        }
    }
}

impl FromRef<AppState> for SharedBoard {
    fn from_ref(state: &AppState) -> Self {
        state.board.clone()
    }
}

impl FromRef<AppState> for ActiveSession {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
