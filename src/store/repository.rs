// src/store/repository.rs

use std::sync::Arc;

use tokio::sync::broadcast;

use super::{Collection, KeyValueStore, load_collection, save_collection};
use crate::{
    error::AppError,
    models::{attempt::QuizAttempt, quiz::Quiz, user::User},
};

/// Notification sent to subscribers after state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A collection was written to the store.
    Collection(Collection),
    /// The session's current user changed.
    CurrentUser(Option<String>),
}

/// In-memory cache of the three collections over a key-value store.
///
/// Writes go to the store first; the cache is only replaced once the store
/// accepted the new value.
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    quizzes: Vec<Quiz>,
    attempts: Vec<QuizAttempt>,
    users: Vec<User>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Repository {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let quizzes = load_collection(store.as_ref(), Collection::Quizzes).await?;
        let attempts = load_collection(store.as_ref(), Collection::Attempts).await?;
        let users = load_collection(store.as_ref(), Collection::Users).await?;
        let (events, _) = broadcast::channel(64);

        tracing::info!(
            "Loaded {} quizzes, {} attempts, {} users",
            quizzes.len(),
            attempts.len(),
            users.len()
        );

        Ok(Self {
            store,
            quizzes,
            attempts,
            users,
            events,
        })
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn attempts(&self) -> &[QuizAttempt] {
        &self.attempts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Sends an event. Having no subscribers is not an error.
    pub fn notify(&self, event: ChangeEvent) {
        let _ = self.events.send(event);
    }

    pub async fn save_quizzes(&mut self, quizzes: Vec<Quiz>) -> Result<(), AppError> {
        save_collection(self.store.as_ref(), Collection::Quizzes, &quizzes).await?;
        self.quizzes = quizzes;
        self.notify(ChangeEvent::Collection(Collection::Quizzes));
        Ok(())
    }

    pub async fn save_attempts(&mut self, attempts: Vec<QuizAttempt>) -> Result<(), AppError> {
        save_collection(self.store.as_ref(), Collection::Attempts, &attempts).await?;
        self.attempts = attempts;
        self.notify(ChangeEvent::Collection(Collection::Attempts));
        Ok(())
    }

    pub async fn save_users(&mut self, users: Vec<User>) -> Result<(), AppError> {
        save_collection(self.store.as_ref(), Collection::Users, &users).await?;
        self.users = users;
        self.notify(ChangeEvent::Collection(Collection::Users));
        Ok(())
    }
}
