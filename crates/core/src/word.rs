//! Word model - a vocabulary item under study.

use serde::{Deserialize, Serialize};
use crate::id::WordId;
use crate::Time;

/// Interval (in days) above which a word counts as mastered.
pub const MASTERY_THRESHOLD_DAYS: u32 = 60;

/// A vocabulary item together with its spaced-repetition schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Unique identifier
    pub id: WordId,

    /// Spelling as stored (unique, case-sensitive)
    pub spelling: String,

    /// Meaning shown to the learner
    pub meaning: String,

    /// Schedule status
    pub status: WordStatus,

    /// Current review interval in days
    pub interval: u32,

    /// Number of correct answers so far
    pub repetition_count: u32,

    /// When the word is next due; `None` while unscheduled
    pub next_review_at: Option<Time>,

    /// When the word was last studied
    pub last_seen_at: Option<Time>,
}

impl Word {
    /// Create a new, unscheduled word.
    pub fn new(spelling: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: WordId::new(),
            spelling: spelling.into(),
            meaning: meaning.into(),
            status: WordStatus::New,
            interval: 0,
            repetition_count: 0,
            next_review_at: None,
            last_seen_at: None,
        }
    }

    /// Whether the word is scheduled and due at `now`.
    pub fn is_due(&self, now: Time) -> bool {
        matches!(self.next_review_at, Some(at) if at <= now)
    }

    /// Put the word back into its freshly-created schedule state.
    pub fn reset_schedule(&mut self) {
        self.status = WordStatus::New;
        self.interval = 0;
        self.repetition_count = 0;
        self.next_review_at = None;
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &WordPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(interval) = patch.interval {
            self.interval = interval;
        }
        if let Some(count) = patch.repetition_count {
            self.repetition_count = count;
        }
        if let Some(at) = patch.next_review_at {
            self.next_review_at = Some(at);
        }
        if let Some(at) = patch.last_seen_at {
            self.last_seen_at = Some(at);
        }
    }
}

/// Spaced-repetition status of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordStatus {
    /// Never studied
    New,
    /// Reset after a miss
    Learning,
    /// Scheduled for review
    Review,
    /// Interval beyond the mastery threshold
    Mastered,
}

impl WordStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [WordStatus; 4] = [
        WordStatus::New,
        WordStatus::Learning,
        WordStatus::Review,
        WordStatus::Mastered,
    ];

    /// Stable name for display and parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            WordStatus::New => "New",
            WordStatus::Learning => "Learning",
            WordStatus::Review => "Review",
            WordStatus::Mastered => "Mastered",
        }
    }
}

impl std::fmt::Display for WordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for WordStatus {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(WordStatus::New),
            "learning" => Ok(WordStatus::Learning),
            "review" => Ok(WordStatus::Review),
            "mastered" => Ok(WordStatus::Mastered),
            _ => Err(crate::ParseError::UnknownStatus(s.to_string())),
        }
    }
}

/// Partial update for a stored word.
///
/// `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordPatch {
    /// New status
    pub status: Option<WordStatus>,
    /// New interval in days
    pub interval: Option<u32>,
    /// New repetition count
    pub repetition_count: Option<u32>,
    /// New due date
    pub next_review_at: Option<Time>,
    /// When the word was studied
    pub last_seen_at: Option<Time>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_new_word_is_unscheduled() {
        let word = Word::new("apple", "a fruit");
        assert_eq!(word.status, WordStatus::New);
        assert_eq!(word.interval, 0);
        assert!(word.next_review_at.is_none());
        assert!(!word.is_due(Utc::now()));
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut word = Word::new("apple", "a fruit");
        let due = Utc::now() + Duration::days(3);

        word.apply(&WordPatch {
            status: Some(WordStatus::Review),
            interval: Some(3),
            next_review_at: Some(due),
            ..Default::default()
        });

        assert_eq!(word.status, WordStatus::Review);
        assert_eq!(word.interval, 3);
        assert_eq!(word.repetition_count, 0);
        assert_eq!(word.next_review_at, Some(due));
        assert!(word.last_seen_at.is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("mastered".parse::<WordStatus>().unwrap(), WordStatus::Mastered);
        assert_eq!("Review".parse::<WordStatus>().unwrap(), WordStatus::Review);
        assert!("done".parse::<WordStatus>().is_err());
    }
}
