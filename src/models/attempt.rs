// src/models/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::quiz::Quiz, services::scoring};

/// Submitted answers of one run.
/// Key: Question ID
/// Value: the strings the taker picked or typed, in submission order
pub type AnswerSheet = HashMap<String, Vec<String>>;

/// One completed run of a quiz by a user. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub answers: AnswerSheet,
    pub score: u32,

    /// Copied from the quiz when the attempt completes.
    pub total_points: u32,

    pub completed_at: DateTime<Utc>,

    /// Seconds spent on the run.
    pub time_spent: u64,
}

impl QuizAttempt {
    /// Score as a percentage of the attempt's maximum.
    pub fn percentage(&self) -> f64 {
        scoring::percentage(self.score, self.total_points)
    }
}

/// DTO for completing a run. The score is computed by the core, not trusted
/// from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptDraft {
    pub quiz_id: String,
    #[serde(default)]
    pub answers: AnswerSheet,
    #[serde(default)]
    pub time_spent: u64,
}

/// What the result screen shows after a run is submitted.
#[derive(Debug, Serialize)]
pub struct AttemptResult {
    pub attempt: QuizAttempt,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Rounded percentage.
    pub percentage: u32,
    pub passed: bool,
}

impl AttemptResult {
    pub fn new(quiz: &Quiz, attempt: QuizAttempt) -> Self {
        let grade = scoring::grade(quiz, &attempt.answers);
        Self {
            correct_count: grade.correct_count,
            total_questions: grade.total_questions,
            percentage: scoring::rounded_percentage(attempt.score, attempt.total_points),
            passed: scoring::passed(attempt.score, attempt.total_points),
            attempt,
        }
    }
}
