//! Adaptive learning engine (Layer 2)
//!
//! Word selection, spaced-repetition scheduling, difficulty adaptation and
//! study session grading.

#![warn(missing_docs)]

pub mod selector;
pub mod srs;
pub mod difficulty;
pub mod session;
pub mod stats;

pub use selector::{select_words_for_article, select_words_with};
pub use srs::{calculate_next_review, calculate_next_review_at, ReviewUpdate};
pub use difficulty::{calculate_new_difficulty, AccuracyStats};
pub use session::{StudySessionService, SessionError, SubmissionSummary};
pub use stats::{overview, LevelBucket, OverviewStats, QuizStats, ScoreDistribution};
