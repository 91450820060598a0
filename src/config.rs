// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Minimum rounded percentage for a run to count as passed.
pub const PASSING_PERCENTAGE: u32 = 60;

/// Number of quizzes per catalog page when `PAGE_SIZE` is not set.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// How many of a user's latest attempts feed the leaderboard's recent average.
pub const RECENT_ATTEMPTS_WINDOW: usize = 5;

/// Upper bound on the points a single question may be worth.
pub const MAX_QUESTION_POINTS: u32 = 10_000;

/// Period of the elapsed-time display, in seconds.
pub const TICK_INTERVAL_SECS: u64 = 1;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_STORE_URL: &str = "memory";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub rust_log: String,
    pub seed_data: bool,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quizboard.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let seed_data = env::var("SEED_DATA")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        let page_size = env::var("PAGE_SIZE")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            database_url,
            bind_addr,
            rust_log,
            seed_data,
            page_size,
        }
    }

    /// Whether the configured store is the ephemeral in-memory one.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_STORE_URL
    }
}
