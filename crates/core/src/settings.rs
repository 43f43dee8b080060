//! Process-wide learner settings.

use serde::{Deserialize, Serialize};

/// Content difficulty tier, ordered `L1 < L2 < L3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// Easiest passages
    L1,
    /// Intermediate; the starting level
    #[default]
    L2,
    /// Hardest passages
    L3,
}

impl DifficultyLevel {
    /// One level up, saturating at L3.
    pub fn harder(self) -> Self {
        match self {
            DifficultyLevel::L1 => DifficultyLevel::L2,
            DifficultyLevel::L2 | DifficultyLevel::L3 => DifficultyLevel::L3,
        }
    }

    /// One level down, saturating at L1.
    pub fn easier(self) -> Self {
        match self {
            DifficultyLevel::L3 => DifficultyLevel::L2,
            DifficultyLevel::L2 | DifficultyLevel::L1 => DifficultyLevel::L1,
        }
    }

    /// Stable name for display and parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::L1 => "L1",
            DifficultyLevel::L2 => "L2",
            DifficultyLevel::L3 => "L3",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for DifficultyLevel {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "L1" => Ok(DifficultyLevel::L1),
            "L2" => Ok(DifficultyLevel::L2),
            "L3" => Ok(DifficultyLevel::L3),
            _ => Err(crate::ParseError::UnknownLevel(s.to_string())),
        }
    }
}

/// Learner settings as stored by the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Current content level
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,

    /// How many new words a day the learner wants
    #[serde(default = "default_daily_new_limit")]
    pub daily_new_limit: u32,
}

fn default_daily_new_limit() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty_level: DifficultyLevel::default(),
            daily_new_limit: default_daily_new_limit(),
        }
    }
}

impl Settings {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(level) = patch.difficulty_level {
            self.difficulty_level = level;
        }
        if let Some(limit) = patch.daily_new_limit {
            self.daily_new_limit = limit;
        }
    }
}

/// Partial update for the stored settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    /// New content level
    pub difficulty_level: Option<DifficultyLevel>,
    /// New daily limit for new words
    pub daily_new_limit: Option<u32>,
}
