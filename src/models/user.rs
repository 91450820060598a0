// src/models/user.rs

use serde::{Deserialize, Serialize};

/// A quiz taker and their running statistics.
/// The statistics are written only when an attempt is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    pub name: String,

    /// Sum of the scores of every recorded attempt.
    pub total_points: u64,

    pub quizzes_completed: u32,

    /// `round(total_points / quizzes_completed)`. Raw points per quiz, not a
    /// percentage of the maximum.
    pub average_score: u32,
}

/// DTO for choosing the current user of the session.
#[derive(Debug, Deserialize)]
pub struct SelectUserRequest {
    pub user_id: String,
}
