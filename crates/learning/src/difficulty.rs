//! Content difficulty adaptation.

use lexis_core::DifficultyLevel;

/// Reading accuracy needed (together with total accuracy) to move up.
const UPGRADE_READING: f64 = 0.8;
const UPGRADE_TOTAL: f64 = 0.85;

/// Falling below either of these moves down.
const DOWNGRADE_READING: f64 = 0.5;
const DOWNGRADE_TOTAL: f64 = 0.6;

/// Accuracy ratios of one session, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyStats {
    /// Correct reading answers over reading questions
    pub reading_accuracy: f64,
    /// Correct answers over all questions
    pub total_accuracy: f64,
}

/// Next difficulty level after a session, moving at most one step.
pub fn calculate_new_difficulty(current: DifficultyLevel, stats: AccuracyStats) -> DifficultyLevel {
    if stats.reading_accuracy >= UPGRADE_READING && stats.total_accuracy >= UPGRADE_TOTAL {
        current.harder()
    } else if stats.reading_accuracy < DOWNGRADE_READING || stats.total_accuracy < DOWNGRADE_TOTAL {
        current.easier()
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DifficultyLevel::*;

    fn stats(reading_accuracy: f64, total_accuracy: f64) -> AccuracyStats {
        AccuracyStats { reading_accuracy, total_accuracy }
    }

    #[test]
    fn test_upgrade() {
        assert_eq!(calculate_new_difficulty(L1, stats(0.9, 0.9)), L2);
        assert_eq!(calculate_new_difficulty(L1, stats(0.8, 0.85)), L2);
        assert_eq!(calculate_new_difficulty(L2, stats(0.8, 0.85)), L3);
        assert_eq!(calculate_new_difficulty(L3, stats(0.9, 0.9)), L3);
    }

    #[test]
    fn test_no_upgrade_when_one_ratio_short() {
        assert_eq!(calculate_new_difficulty(L1, stats(1.0, 0.84)), L1);
        assert_eq!(calculate_new_difficulty(L1, stats(0.75, 0.9)), L1);
    }

    #[test]
    fn test_downgrade() {
        assert_eq!(calculate_new_difficulty(L2, stats(0.3, 0.9)), L1);
        assert_eq!(calculate_new_difficulty(L2, stats(0.25, 0.7)), L1);
        assert_eq!(calculate_new_difficulty(L3, stats(1.0, 0.5)), L2);
        assert_eq!(calculate_new_difficulty(L1, stats(0.1, 0.1)), L1);
    }

    #[test]
    fn test_learning_zone_keeps_level() {
        assert_eq!(calculate_new_difficulty(L2, stats(0.75, 0.7)), L2);
        assert_eq!(calculate_new_difficulty(L2, stats(1.0, 0.8)), L2);
        assert_eq!(calculate_new_difficulty(L2, stats(0.5, 0.6)), L2);
    }

    #[test]
    fn test_same_input_same_output() {
        let s = stats(0.9, 0.9);
        assert_eq!(calculate_new_difficulty(L1, s), calculate_new_difficulty(L1, s));
    }
}
