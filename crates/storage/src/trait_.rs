//! Storage trait abstractions for the learning engine's collaborators.

use async_trait::async_trait;
use lexis_core::{QuizOutcome, QuizRecordId, QuizSession, Settings, SettingsPatch, Word, WordId, WordPatch};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Word collection.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Load every stored word.
    async fn get_all(&self) -> Result<Vec<Word>>;

    /// Apply a partial update to one word.
    async fn update(&self, id: WordId, patch: &WordPatch) -> Result<()>;
}

/// Quiz record collection.
#[async_trait]
pub trait QuizRecordStore: Send + Sync {
    /// Load a record by ID.
    async fn get_by_id(&self, id: QuizRecordId) -> Result<Option<QuizSession>>;

    /// Write the grading outcome onto a record.
    async fn update(&self, id: QuizRecordId, outcome: &QuizOutcome) -> Result<()>;
}

/// Single settings value.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current settings, defaults if none were saved yet.
    async fn get(&self) -> Result<Settings>;

    /// Apply a partial update.
    async fn save(&self, patch: &SettingsPatch) -> Result<()>;
}
