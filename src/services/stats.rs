// src/services/stats.rs

use serde::Serialize;

use crate::{
    config::RECENT_ATTEMPTS_WINDOW,
    models::{attempt::QuizAttempt, user::User},
};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub user: User,
    /// Rounded mean percentage of the user's latest attempts.
    pub recent_average: u32,
    /// Best percentage over all of the user's attempts.
    pub best_score: f64,
}

/// Totals shown under the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardSummary {
    pub participants: usize,
    pub mean_average_score: u32,
    pub top_points: u64,
}

/// Folds a completed attempt into the user's running totals.
///
/// `average_score` is raw points per completed quiz, rounded. It is not a
/// percentage of the maximum and must stay that way: leaderboards already
/// display the stored figures.
pub fn record_attempt(user: &User, attempt: &QuizAttempt) -> User {
    let total_points = user.total_points + u64::from(attempt.score);
    let quizzes_completed = user.quizzes_completed + 1;
    let average_score = (total_points as f64 / f64::from(quizzes_completed)).round() as u32;

    User {
        total_points,
        quizzes_completed,
        average_score,
        ..user.clone()
    }
}

/// Ranks users by total points, highest first. Ties keep input order.
pub fn rank_users(users: &[User], attempts: &[QuizAttempt]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|user| {
            let mut history: Vec<&QuizAttempt> =
                attempts.iter().filter(|a| a.user_id == user.id).collect();
            history.sort_by_key(|a| a.completed_at);

            let recent = &history[history.len().saturating_sub(RECENT_ATTEMPTS_WINDOW)..];
            let recent_average = if recent.is_empty() {
                0
            } else {
                let sum: f64 = recent.iter().map(|a| a.percentage()).sum();
                (sum / recent.len() as f64).round() as u32
            };

            let best_score = history
                .iter()
                .map(|a| a.percentage())
                .fold(0.0, f64::max);

            LeaderboardEntry {
                user: user.clone(),
                recent_average,
                best_score,
            }
        })
        .collect();

    // `sort_by` is stable
    entries.sort_by(|a, b| b.user.total_points.cmp(&a.user.total_points));
    entries
}

pub fn summarize(entries: &[LeaderboardEntry]) -> LeaderboardSummary {
    let participants = entries.len();
    let mean_average_score = if participants == 0 {
        0
    } else {
        let sum: u64 = entries.iter().map(|e| u64::from(e.user.average_score)).sum();
        (sum as f64 / participants as f64).round() as u32
    };

    LeaderboardSummary {
        participants,
        mean_average_score,
        top_points: entries.first().map(|e| e.user.total_points).unwrap_or(0),
    }
}
