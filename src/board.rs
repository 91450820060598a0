// src/board.rs

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::{
    error::AppError,
    models::{
        attempt::{AttemptDraft, QuizAttempt},
        quiz::{Quiz, QuizDraft},
        user::User,
    },
    seed,
    services::{
        catalog::{self, CatalogPage},
        scoring,
        stats::{self, LeaderboardEntry, LeaderboardSummary},
    },
    store::{
        KeyValueStore, Repository,
        repository::ChangeEvent,
    },
};

/// Ranked users plus the footer totals.
#[derive(Debug, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub summary: LeaderboardSummary,
}

/// Which collections the seed step filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub quizzes_seeded: bool,
    pub users_seeded: bool,
}

/// The application state: the three collections and the session's current
/// user. All mutation goes through `add_quiz`, `add_attempt` and
/// `select_user`.
pub struct QuizBoard {
    repo: Repository,
    current_user: Option<String>,
}

impl QuizBoard {
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        Ok(Self {
            repo: Repository::load(store).await?,
            current_user: None,
        })
    }

    pub fn quizzes(&self) -> &[Quiz] {
        self.repo.quizzes()
    }

    pub fn attempts(&self) -> &[QuizAttempt] {
        self.repo.attempts()
    }

    pub fn users(&self) -> &[User] {
        self.repo.users()
    }

    /// Looks up a quiz. A miss is an ordinary outcome, not an error.
    pub fn find_quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes().iter().find(|q| q.id == quiz_id)
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users().iter().find(|u| u.id == user_id)
    }

    /// A user's attempts in the order they were recorded.
    pub fn attempts_for_user(&self, user_id: &str) -> Vec<&QuizAttempt> {
        self.attempts().iter().filter(|a| a.user_id == user_id).collect()
    }

    /// The selected user, read from the collection so stats are current.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_deref().and_then(|id| self.find_user(id))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.repo.subscribe()
    }

    /// Makes `user_id` the session's current user. Not persisted.
    pub fn select_user(&mut self, user_id: &str) -> Result<User, AppError> {
        let user = self
            .find_user(user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_id)))?;

        tracing::info!("Current user is now {} ({})", user.name, user.id);
        self.current_user = Some(user.id.clone());
        self.repo.notify(ChangeEvent::CurrentUser(Some(user.id.clone())));
        Ok(user)
    }

    /// Fills empty collections with example data. Non-empty ones are never
    /// touched, so calling this repeatedly is harmless.
    pub async fn seed_if_empty(&mut self) -> Result<SeedOutcome, AppError> {
        let mut outcome = SeedOutcome::default();

        if self.quizzes().is_empty() {
            tracing::info!("Seeding example quizzes");
            self.repo.save_quizzes(seed::sample_quizzes(Utc::now())).await?;
            outcome.quizzes_seeded = true;
        }

        if self.users().is_empty() {
            tracing::info!("Seeding example users");
            self.repo.save_users(seed::sample_users()).await?;
            outcome.users_seeded = true;
        }

        Ok(outcome)
    }

    /// Creates a quiz from a draft and appends it to the catalog.
    pub async fn add_quiz(&mut self, draft: QuizDraft, created_by: &str) -> Result<Quiz, AppError> {
        let quiz = draft.into_quiz(created_by, Utc::now())?;

        let mut quizzes = self.quizzes().to_vec();
        quizzes.push(quiz.clone());
        self.repo.save_quizzes(quizzes).await?;

        tracing::info!(
            "Quiz '{}' ({}) created by {} with {} questions, {} points",
            quiz.title,
            quiz.id,
            quiz.created_by,
            quiz.questions.len(),
            quiz.total_points
        );
        Ok(quiz)
    }

    /// Scores a completed run for the current user, stores the attempt and
    /// folds it into the user's statistics.
    ///
    /// Refuses with `NoActiveUser` when nobody is selected and `NotFound` when
    /// the quiz is unknown; neither case changes any state. If the user
    /// statistics cannot be written, the attempt is withdrawn again.
    pub async fn add_attempt(&mut self, draft: AttemptDraft) -> Result<QuizAttempt, AppError> {
        let user = self.current_user().cloned().ok_or(AppError::NoActiveUser)?;
        let quiz = self
            .find_quiz(&draft.quiz_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", draft.quiz_id)))?;

        let score = scoring::score(quiz, &draft.answers);
        let attempt = QuizAttempt {
            id: uuid::Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            user_id: user.id.clone(),
            answers: draft.answers,
            score,
            total_points: quiz.total_points,
            completed_at: Utc::now(),
            time_spent: draft.time_spent,
        };

        let updated = stats::record_attempt(&user, &attempt);

        let previous_attempts = self.attempts().to_vec();
        let mut attempts = previous_attempts.clone();
        attempts.push(attempt.clone());
        let users: Vec<User> = self
            .users()
            .iter()
            .map(|u| if u.id == updated.id { updated.clone() } else { u.clone() })
            .collect();

        self.repo.save_attempts(attempts).await?;
        if let Err(err) = self.repo.save_users(users).await {
            tracing::error!("Failed to update stats of {}, withdrawing attempt {}: {}", user.id, attempt.id, err);
            if let Err(rollback) = self.repo.save_attempts(previous_attempts).await {
                tracing::error!("Failed to withdraw attempt {}: {}", attempt.id, rollback);
            }
            return Err(err);
        }

        tracing::info!(
            "{} scored {}/{} on quiz {} in {}s",
            user.name,
            attempt.score,
            attempt.total_points,
            attempt.quiz_id,
            attempt.time_spent
        );
        Ok(attempt)
    }

    pub fn catalog(&self, search_term: &str, selected_tags: &[String], page: usize, page_size: usize) -> CatalogPage<'_> {
        catalog::filter_quizzes(self.quizzes(), search_term, selected_tags, page, page_size)
    }

    pub fn tags(&self) -> Vec<String> {
        catalog::all_tags(self.quizzes())
    }

    pub fn leaderboard(&self) -> Leaderboard {
        let entries = stats::rank_users(self.users(), self.attempts());
        let summary = stats::summarize(&entries);
        Leaderboard { entries, summary }
    }
}
