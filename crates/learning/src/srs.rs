//! Spaced-repetition scheduling.
//!
//! Correct answers grow the interval `0 -> 1 -> 3 -> ceil(x * 2.2)` days; an
//! interval past the mastery threshold marks the word Mastered. Any miss
//! drops the word back to Learning with a one-day interval, keeping its
//! repetition count.
//!
//! | state    | correct                          | incorrect          |
//! |----------|----------------------------------|--------------------|
//! | New      | Review, interval 1               | Learning, 1        |
//! | Learning | Review (or Mastered), grown      | Learning, 1        |
//! | Review   | Review (or Mastered), grown      | Learning, 1        |
//! | Mastered | Mastered, grown                  | Learning, 1        |

use chrono::{Duration, Utc};
use lexis_core::{Time, Word, WordPatch, WordStatus, MASTERY_THRESHOLD_DAYS};

/// Interval multiplier once past the fixed first steps, in tenths (2.2x).
const GROWTH_TENTHS: u64 = 22;

/// Upper bound on any interval; keeps due dates representable.
const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Schedule state produced for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewUpdate {
    /// Status after the answer
    pub status: WordStatus,
    /// Next due date
    pub next_review_at: Time,
    /// Interval in days
    pub interval: u32,
    /// Correct answers so far
    pub repetition_count: u32,
}

impl ReviewUpdate {
    /// Storage patch carrying this schedule, stamped as seen at `seen_at`.
    pub fn to_patch(&self, seen_at: Time) -> WordPatch {
        WordPatch {
            status: Some(self.status),
            interval: Some(self.interval),
            repetition_count: Some(self.repetition_count),
            next_review_at: Some(self.next_review_at),
            last_seen_at: Some(seen_at),
        }
    }
}

/// Calculate the next schedule for `word` as of now.
pub fn calculate_next_review(word: &Word, is_correct: bool) -> ReviewUpdate {
    calculate_next_review_at(word, is_correct, Utc::now())
}

/// Calculate the next schedule for `word` as of `now`.
pub fn calculate_next_review_at(word: &Word, is_correct: bool, now: Time) -> ReviewUpdate {
    let (status, interval, repetition_count) = if is_correct {
        let interval = grow_interval(word.interval);
        let status = if interval > MASTERY_THRESHOLD_DAYS {
            WordStatus::Mastered
        } else {
            WordStatus::Review
        };
        (status, interval, word.repetition_count.saturating_add(1))
    } else {
        (WordStatus::Learning, 1, word.repetition_count)
    };

    ReviewUpdate {
        status,
        next_review_at: now + Duration::days(i64::from(interval)),
        interval,
        repetition_count,
    }
}

fn grow_interval(interval: u32) -> u32 {
    match interval {
        0 => 1,
        1 => 3,
        // Integer ceil(n * 2.2), exact for every n.
        n => {
            let grown = (u64::from(n) * GROWTH_TENTHS + 9) / 10;
            u32::try_from(grown).unwrap_or(u32::MAX).min(MAX_INTERVAL_DAYS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_with_interval(interval: u32) -> Word {
        let mut word = Word::new("apple", "a fruit");
        if interval > 0 {
            word.status = WordStatus::Review;
            word.interval = interval;
            word.repetition_count = 2;
        }
        word
    }

    #[test]
    fn test_first_correct_answer() {
        let now = Utc::now();
        let word = word_with_interval(0);
        let result = calculate_next_review_at(&word, true, now);

        assert_eq!(result.interval, 1);
        assert_eq!(result.status, WordStatus::Review);
        assert_eq!(result.repetition_count, 1);
        assert_eq!(result.next_review_at, now + Duration::days(1));
    }

    #[test]
    fn test_second_step_is_three_days() {
        let result = calculate_next_review(&word_with_interval(1), true);
        assert_eq!(result.interval, 3);
        assert_eq!(result.status, WordStatus::Review);
    }

    #[test]
    fn test_growth_rounds_up() {
        // 3 * 2.2 = 6.6
        assert_eq!(calculate_next_review(&word_with_interval(3), true).interval, 7);
        // 7 * 2.2 = 15.4
        assert_eq!(calculate_next_review(&word_with_interval(7), true).interval, 16);
        // 5 * 2.2 = 11 exactly
        assert_eq!(calculate_next_review(&word_with_interval(5), true).interval, 11);
    }

    #[test]
    fn test_mastery_past_threshold() {
        let result = calculate_next_review(&word_with_interval(30), true);
        assert_eq!(result.interval, 66);
        assert_eq!(result.status, WordStatus::Mastered);

        // 27 * 2.2 = 59.4 -> 60, not past the threshold
        let result = calculate_next_review(&word_with_interval(27), true);
        assert_eq!(result.interval, 60);
        assert_eq!(result.status, WordStatus::Review);
    }

    #[test]
    fn test_interval_is_capped() {
        let mut word = word_with_interval(30_000);
        word.status = WordStatus::Mastered;
        let result = calculate_next_review(&word, true);
        assert_eq!(result.interval, MAX_INTERVAL_DAYS);
        assert_eq!(result.status, WordStatus::Mastered);
    }

    #[test]
    fn test_incorrect_resets_to_learning() {
        let now = Utc::now();
        for interval in [0, 1, 3, 30, 90] {
            let word = word_with_interval(interval);
            let result = calculate_next_review_at(&word, false, now);

            assert_eq!(result.interval, 1);
            assert_eq!(result.status, WordStatus::Learning);
            assert_eq!(result.repetition_count, word.repetition_count);
            assert_eq!(result.next_review_at, now + Duration::days(1));
        }
    }

    #[test]
    fn test_input_is_not_mutated_and_output_is_stable() {
        let now = Utc::now();
        let word = word_with_interval(3);
        let before = word.clone();

        let a = calculate_next_review_at(&word, true, now);
        let b = calculate_next_review_at(&word, true, now);

        assert_eq!(a, b);
        assert_eq!(word, before);
    }

    #[test]
    fn test_patch_carries_all_fields() {
        let now = Utc::now();
        let update = calculate_next_review_at(&word_with_interval(0), true, now);
        let patch = update.to_patch(now);

        let mut word = word_with_interval(0);
        word.apply(&patch);
        assert_eq!(word.status, WordStatus::Review);
        assert_eq!(word.interval, 1);
        assert_eq!(word.repetition_count, 1);
        assert_eq!(word.last_seen_at, Some(now));
    }
}
