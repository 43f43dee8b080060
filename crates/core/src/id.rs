//! Unique identifiers for lexis entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(Ulid);

impl WordId {
    /// Generate a new WordId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for WordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for WordId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a quiz record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizRecordId(Ulid);

impl QuizRecordId {
    /// Generate a new QuizRecordId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for QuizRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuizRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for QuizRecordId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_parse_from_display() {
        let id = QuizRecordId::new();
        let parsed: QuizRecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        assert!("not-a-ulid".parse::<WordId>().is_err());
    }
}
