//! Mastery overview statistics.

use std::collections::BTreeMap;

use lexis_core::{DifficultyLevel, QuizOutcome, QuizSession, Word, WordStatus};
use serde::Serialize;

/// Graded quiz counts by score band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    /// Scores 0-59
    pub low: usize,
    /// Scores 60-79
    pub mid: usize,
    /// Scores 80-100
    pub high: usize,
}

impl ScoreDistribution {
    fn record(&mut self, score: u8) {
        match score {
            0..=59 => self.low += 1,
            60..=79 => self.mid += 1,
            _ => self.high += 1,
        }
    }
}

/// Difficulty a quiz record is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LevelBucket {
    /// Drafted at L1
    L1,
    /// Drafted at L2
    L2,
    /// Drafted at L3
    L3,
    /// Drafted without a recorded level
    Unknown,
}

impl LevelBucket {
    /// Every bucket, in display order.
    pub const ALL: [LevelBucket; 4] = [
        LevelBucket::L1,
        LevelBucket::L2,
        LevelBucket::L3,
        LevelBucket::Unknown,
    ];
}

impl From<Option<DifficultyLevel>> for LevelBucket {
    fn from(level: Option<DifficultyLevel>) -> Self {
        match level {
            Some(DifficultyLevel::L1) => LevelBucket::L1,
            Some(DifficultyLevel::L2) => LevelBucket::L2,
            Some(DifficultyLevel::L3) => LevelBucket::L3,
            None => LevelBucket::Unknown,
        }
    }
}

impl std::fmt::Display for LevelBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            LevelBucket::L1 => "L1",
            LevelBucket::L2 => "L2",
            LevelBucket::L3 => "L3",
            LevelBucket::Unknown => "Unknown",
        })
    }
}

/// Quiz statistics for one group of graded records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuizStats {
    /// Number of graded quiz records
    pub quizzes: usize,

    /// Score bands of graded records
    pub score_distribution: ScoreDistribution,

    /// Average quiz seconds per question, rounded
    pub avg_quiz_secs_per_question: u64,
}

/// Snapshot of vocabulary and quiz progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    /// Words per status; every status is present
    pub word_counts: BTreeMap<WordStatus, usize>,

    /// All graded records together
    pub quizzes: QuizStats,

    /// Graded records per difficulty; every bucket is present
    pub by_level: BTreeMap<LevelBucket, QuizStats>,
}

#[derive(Default)]
struct Tally {
    quizzes: usize,
    scores: ScoreDistribution,
    // Seconds per question of records with a positive quiz duration.
    per_question: Vec<f64>,
}

impl Tally {
    fn add(&mut self, record: &QuizSession, outcome: &QuizOutcome) {
        self.quizzes += 1;
        self.scores.record(outcome.score);

        let questions = record.questions.len();
        if outcome.quiz_duration > 0 && questions > 0 {
            self.per_question
                .push(outcome.quiz_duration as f64 / questions as f64);
        }
    }

    fn finish(&self) -> QuizStats {
        let avg_quiz_secs_per_question = if self.per_question.is_empty() {
            0
        } else {
            (self.per_question.iter().sum::<f64>() / self.per_question.len() as f64).round() as u64
        };

        QuizStats {
            quizzes: self.quizzes,
            score_distribution: self.scores,
            avg_quiz_secs_per_question,
        }
    }
}

/// Compute overview statistics. Draft records are ignored.
pub fn overview(words: &[Word], records: &[QuizSession]) -> OverviewStats {
    let mut word_counts: BTreeMap<WordStatus, usize> =
        WordStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for word in words {
        *word_counts.entry(word.status).or_default() += 1;
    }

    let mut total = Tally::default();
    let mut levels: BTreeMap<LevelBucket, Tally> =
        LevelBucket::ALL.iter().map(|b| (*b, Tally::default())).collect();

    for record in records {
        let Some(outcome) = &record.outcome else {
            continue;
        };
        total.add(record, outcome);
        levels
            .entry(record.difficulty_level.into())
            .or_default()
            .add(record, outcome);
    }

    OverviewStats {
        word_counts,
        quizzes: total.finish(),
        by_level: levels
            .iter()
            .map(|(bucket, tally)| (*bucket, tally.finish()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_core::{Question, QuestionSet, UserAnswers};

    fn graded(score: u8, quiz_duration: u64, questions: usize) -> QuizSession {
        let mut record = QuizSession::draft(
            "article",
            QuestionSet {
                reading: (0..questions)
                    .map(|i| Question::new(format!("r{}", i), "?", "A"))
                    .collect(),
                vocabulary: vec![],
            },
        );
        record.outcome = Some(QuizOutcome {
            score,
            user_answers: UserAnswers::default(),
            word_results: Default::default(),
            time_spent: quiz_duration,
            quiz_duration,
            graded_at: chrono::Utc::now(),
        });
        record
    }

    fn at(level: DifficultyLevel, mut record: QuizSession) -> QuizSession {
        record.difficulty_level = Some(level);
        record
    }

    #[test]
    fn test_empty_overview() {
        let stats = overview(&[], &[]);
        assert_eq!(stats.word_counts.len(), 4);
        assert!(stats.word_counts.values().all(|c| *c == 0));
        assert_eq!(stats.quizzes, QuizStats::default());
        assert_eq!(stats.by_level.len(), 4);
        assert!(stats.by_level.values().all(|s| *s == QuizStats::default()));
    }

    #[test]
    fn test_word_counts_by_status() {
        let mut mastered = Word::new("apple", "a fruit");
        mastered.status = WordStatus::Mastered;
        let words = vec![mastered, Word::new("pear", "a fruit"), Word::new("plum", "a fruit")];

        let stats = overview(&words, &[]);
        assert_eq!(stats.word_counts[&WordStatus::New], 2);
        assert_eq!(stats.word_counts[&WordStatus::Mastered], 1);
        assert_eq!(stats.word_counts[&WordStatus::Review], 0);
    }

    #[test]
    fn test_scores_and_speed_skip_drafts() {
        let records = vec![
            graded(45, 40, 4),
            graded(60, 0, 4),
            graded(79, 30, 2),
            graded(100, 60, 4),
            QuizSession::draft("article", QuestionSet::default()),
        ];

        let stats = overview(&[], &records);
        assert_eq!(stats.quizzes.quizzes, 4);
        assert_eq!(
            stats.quizzes.score_distribution,
            ScoreDistribution { low: 1, mid: 2, high: 1 }
        );
        // (10 + 15 + 15) / 3
        assert_eq!(stats.quizzes.avg_quiz_secs_per_question, 13);
    }

    #[test]
    fn test_breakdown_by_level() {
        let records = vec![
            at(DifficultyLevel::L1, graded(90, 20, 2)),
            at(DifficultyLevel::L1, graded(50, 40, 2)),
            at(DifficultyLevel::L3, graded(70, 30, 3)),
            graded(85, 0, 1),
            at(DifficultyLevel::L2, QuizSession::draft("article", QuestionSet::default())),
        ];

        let stats = overview(&[], &records);
        assert_eq!(stats.quizzes.quizzes, 4);

        let l1 = stats.by_level[&LevelBucket::L1];
        assert_eq!(l1.quizzes, 2);
        assert_eq!(l1.score_distribution, ScoreDistribution { low: 1, mid: 0, high: 1 });
        // (10 + 20) / 2
        assert_eq!(l1.avg_quiz_secs_per_question, 15);

        assert_eq!(stats.by_level[&LevelBucket::L2], QuizStats::default());

        let l3 = stats.by_level[&LevelBucket::L3];
        assert_eq!(l3.score_distribution, ScoreDistribution { low: 0, mid: 1, high: 0 });
        assert_eq!(l3.avg_quiz_secs_per_question, 10);

        let unknown = stats.by_level[&LevelBucket::Unknown];
        assert_eq!(unknown.quizzes, 1);
        assert_eq!(unknown.avg_quiz_secs_per_question, 0);
    }
}
