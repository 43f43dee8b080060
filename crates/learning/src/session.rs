//! Study session grading service.
//!
//! Grading runs entirely in memory first; only then are word schedules,
//! the difficulty setting and finally the quiz record written, one awaited
//! call at a time.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use lexis_core::{
    Answer, DifficultyLevel, Question, QuestionSet, QuizOutcome, QuizRecordId, SettingsPatch,
    UserAnswers, Word,
};
use lexis_storage::{QuizRecordStore, SettingsStore, StorageError, WordStore};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::difficulty::{calculate_new_difficulty, AccuracyStats};
use crate::srs::{calculate_next_review_at, ReviewUpdate};

/// Error type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while submitting a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The quiz record does not exist
    #[error("Quiz record not found: {0}")]
    NotFound(QuizRecordId),

    /// The quiz record already carries an outcome
    #[error("Quiz record already graded: {0}")]
    AlreadyGraded(QuizRecordId),

    /// A collaborator store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What a submission reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionSummary {
    /// Graded record
    pub record_id: QuizRecordId,

    /// Percentage score (0-100)
    pub score: u8,

    /// New content level, if it changed
    pub new_difficulty: Option<DifficultyLevel>,

    /// Correctness per resolved word spelling
    pub word_results: BTreeMap<String, bool>,
}

/// In-memory result of grading a question set.
#[derive(Debug, Default)]
struct Grading<'a> {
    reading_correct: usize,
    vocab_correct: usize,
    /// Resolved word and correctness, one entry per vocabulary question.
    reviews: Vec<(&'a Word, bool)>,
}

/// Grades submitted sessions and applies their consequences.
pub struct StudySessionService {
    words: Arc<dyn WordStore>,
    records: Arc<dyn QuizRecordStore>,
    settings: Arc<dyn SettingsStore>,
}

impl StudySessionService {
    /// Create a service over the three collaborator stores.
    pub fn new(
        words: Arc<dyn WordStore>,
        records: Arc<dyn QuizRecordStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            words,
            records,
            settings,
        }
    }

    /// Grade a draft record and persist the results.
    ///
    /// `target_words` are the words the session was built around; vocabulary
    /// questions are matched against them. `quiz_time_spent` is in seconds.
    ///
    /// A missing or already graded record fails before anything is written.
    /// A failing word update aborts the submission; earlier word updates
    /// stay and the record is left ungraded.
    pub async fn submit_quiz_session(
        &self,
        record_id: QuizRecordId,
        answers: UserAnswers,
        target_words: &[Word],
        quiz_time_spent: u64,
    ) -> Result<SubmissionSummary> {
        let record = self
            .records
            .get_by_id(record_id)
            .await?
            .ok_or(SessionError::NotFound(record_id))?;
        if record.is_graded() {
            return Err(SessionError::AlreadyGraded(record_id));
        }

        let now = Utc::now();
        let grading = grade(&record.questions, &answers, target_words);

        let reading_total = record.questions.reading.len();
        let total = record.questions.len();
        let correct = grading.reading_correct + grading.vocab_correct;
        let score = percentage(correct, total);
        let stats = AccuracyStats {
            reading_accuracy: ratio(grading.reading_correct, reading_total),
            total_accuracy: ratio(correct, total),
        };

        let current = self.settings.get().await?.difficulty_level;
        let next = calculate_new_difficulty(current, stats);

        let reviews: Vec<(&Word, bool, ReviewUpdate)> = grading
            .reviews
            .iter()
            .map(|&(word, is_correct)| {
                (word, is_correct, calculate_next_review_at(word, is_correct, now))
            })
            .collect();
        let word_results: BTreeMap<String, bool> = reviews
            .iter()
            .map(|(word, is_correct, _)| (word.spelling.clone(), *is_correct))
            .collect();

        let outcome = QuizOutcome {
            score,
            user_answers: answers,
            word_results: word_results.clone(),
            time_spent: record.reading_duration.saturating_add(quiz_time_spent),
            quiz_duration: quiz_time_spent,
            graded_at: now,
        };

        // Writes start here.
        for (word, _, update) in &reviews {
            debug!(
                "SRS {}: {} -> {} (interval {} -> {})",
                word.spelling, word.status, update.status, word.interval, update.interval
            );
            self.words.update(word.id, &update.to_patch(now)).await?;
        }

        let new_difficulty = if next != current {
            self.settings
                .save(&SettingsPatch {
                    difficulty_level: Some(next),
                    ..Default::default()
                })
                .await?;
            info!("Difficulty changed {} -> {}", current, next);
            Some(next)
        } else {
            None
        };

        self.records.update(record_id, &outcome).await?;

        info!(
            "Graded quiz record {}: score {} ({}/{} correct, {} words reviewed)",
            record_id,
            score,
            correct,
            total,
            word_results.len()
        );

        Ok(SubmissionSummary {
            record_id,
            score,
            new_difficulty,
            word_results,
        })
    }
}

fn grade<'a>(questions: &QuestionSet, answers: &UserAnswers, target_words: &'a [Word]) -> Grading<'a> {
    let mut grading = Grading::default();

    for q in &questions.reading {
        let given = answers.reading.get(&q.id).map(String::as_str);
        if given.is_some() && q.answer.as_text() == given {
            grading.reading_correct += 1;
        }
    }

    for q in &questions.vocabulary {
        let is_correct = vocabulary_correct(&q.answer, answers.vocabulary.get(&q.id));
        if is_correct {
            grading.vocab_correct += 1;
        }

        match resolve_word(q, target_words) {
            Some(word) => grading.reviews.push((word, is_correct)),
            None => warn!(
                "Unresolved word reference for question {} (target {:?}); skipping SRS update",
                q.id, q.target_word
            ),
        }
    }

    grading
}

/// Lists compare element by element; text compares case-insensitively.
/// A missing answer or a shape mismatch is wrong.
fn vocabulary_correct(expected: &Answer, submitted: Option<&Answer>) -> bool {
    match (expected, submitted) {
        (Answer::List(expected), Some(Answer::List(given))) => expected == given,
        (Answer::Text(expected), Some(Answer::Text(given))) => {
            expected.to_lowercase() == given.to_lowercase()
        }
        _ => false,
    }
}

/// Exact target-word match first, else the first word (in slice order)
/// whose spelling occurs in the stem.
fn resolve_word<'a>(q: &Question, target_words: &'a [Word]) -> Option<&'a Word> {
    if let Some(target) = &q.target_word {
        if let Some(word) = target_words.iter().find(|w| &w.spelling == target) {
            return Some(word);
        }
    }
    target_words
        .iter()
        .find(|w| !w.spelling.is_empty() && q.stem.contains(w.spelling.as_str()))
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn percentage(part: usize, whole: usize) -> u8 {
    (ratio(part, whole) * 100.0).round() as u8
}
