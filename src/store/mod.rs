// src/store/mod.rs

//! Persistence behind the board: a key-value store holding one serialized
//! collection per key, and the typed helpers that read and write them.

pub mod memory;
pub mod repository;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

pub use memory::MemoryStore;
pub use repository::Repository;
pub use sqlite::SqliteStore;

/// The named collections kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Quizzes,
    Attempts,
    Users,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Quizzes => "quizzes",
            Collection::Attempts => "attempts",
            Collection::Users => "users",
        }
    }
}

/// A durable string-to-string map. Values are opaque to the store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;
}

/// Reads a collection, defaulting to empty when the key is missing.
/// A value that no longer parses is logged and treated as empty.
pub async fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    collection: Collection,
) -> Result<Vec<T>, AppError> {
    let Some(raw) = store.get(collection.key()).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(
                "Discarding unreadable '{}' collection: {}",
                collection.key(),
                e
            );
            Ok(Vec::new())
        }
    }
}

pub async fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    collection: Collection,
    items: &[T],
) -> Result<(), AppError> {
    let raw = serde_json::to_string(items)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    store.set(collection.key(), raw).await
}
