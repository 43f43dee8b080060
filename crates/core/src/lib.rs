//! lexis core data models.
//!
//! This crate defines the vocabulary, quiz and settings structures that the
//! learning engine reads and mutates.

#![warn(missing_docs)]

// Core identities
mod id;

// Vocabulary
mod word;

// Quiz sessions and settings
mod quiz;
mod settings;

// Re-exports
pub use id::*;

pub use word::{Word, WordStatus, WordPatch, MASTERY_THRESHOLD_DAYS};
pub use quiz::{
    Answer, Question, QuestionKind, QuestionSet, UserAnswers, QuizOutcome, QuizSession,
};
pub use settings::{DifficultyLevel, Settings, SettingsPatch};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Error parsing a model value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not one of the word statuses
    #[error("unknown word status: {0}")]
    UnknownStatus(String),

    /// Not one of L1, L2, L3
    #[error("unknown difficulty level: {0}")]
    UnknownLevel(String),
}
