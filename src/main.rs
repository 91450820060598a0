// src/main.rs

use std::sync::Arc;

use quizboard::board::QuizBoard;
use quizboard::config::Config;
use quizboard::error::AppError;
use quizboard::routes;
use quizboard::state::AppState;
use quizboard::store::{KeyValueStore, MemoryStore, SqliteStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from .env (if present) and the environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "quizboard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store = open_store(&config).await?;
    let mut board = QuizBoard::open(store).await?;

    if config.seed_data {
        let outcome = board.seed_if_empty().await?;
        tracing::info!(
            "Seed step done (quizzes seeded: {}, users seeded: {})",
            outcome.quizzes_seeded,
            outcome.users_seeded
        );
    }

    let app = routes::create_router(AppState::new(board, config.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, AppError> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory store; nothing will survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(&config.database_url).await?;
    tracing::info!("Store opened at {}", config.database_url);
    Ok(Arc::new(store))
}
