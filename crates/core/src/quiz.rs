//! Quiz session model - one attempt at a reading passage's questions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use crate::id::QuizRecordId;
use crate::settings::DifficultyLevel;
use crate::Time;

/// An answer: a single string, or an ordered list for matching questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Scalar answer
    Text(String),
    /// Ordered answer list
    List(Vec<String>),
}

impl Answer {
    /// Scalar text, if this is not a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::List(_) => None,
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Answer::List(items)
    }
}

/// Question shape, as produced by the question generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one from options
    MultipleChoice,
    /// Fill in the blank
    Cloze,
    /// Pair words with definitions
    Matching,
    /// Anything else
    #[default]
    Generic,
}

/// A single quiz question, frozen when the session is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier within the session
    pub id: String,

    /// Question text
    pub stem: String,

    /// Correct answer
    pub answer: Answer,

    /// Question shape
    #[serde(default)]
    pub kind: QuestionKind,

    /// Options offered to the learner, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Spelling of the word this question exercises (vocabulary only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_word: Option<String>,
}

impl Question {
    /// Create a question with a scalar or list answer.
    pub fn new(id: impl Into<String>, stem: impl Into<String>, answer: impl Into<Answer>) -> Self {
        Self {
            id: id.into(),
            stem: stem.into(),
            answer: answer.into(),
            kind: QuestionKind::Generic,
            options: Vec::new(),
            target_word: None,
        }
    }

    /// Set the target word.
    pub fn with_target_word(mut self, spelling: impl Into<String>) -> Self {
        self.target_word = Some(spelling.into());
        self
    }

    /// Set the question kind.
    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Reading and vocabulary questions of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Comprehension questions on the passage
    #[serde(default)]
    pub reading: Vec<Question>,
    /// Questions exercising target words
    #[serde(default)]
    pub vocabulary: Vec<Question>,
}

impl QuestionSet {
    /// Total number of questions.
    pub fn len(&self) -> usize {
        self.reading.len() + self.vocabulary.len()
    }

    /// Whether there are no questions at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Answers submitted by the learner, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAnswers {
    /// Reading answers by question id
    #[serde(default)]
    pub reading: HashMap<String, String>,
    /// Vocabulary answers by question id
    #[serde(default)]
    pub vocabulary: HashMap<String, Answer>,
}

/// Outcome written once when a session is graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Percentage score (0-100)
    pub score: u8,

    /// What the learner submitted
    pub user_answers: UserAnswers,

    /// Correctness per resolved word spelling
    pub word_results: BTreeMap<String, bool>,

    /// Reading plus quiz time, in seconds
    pub time_spent: u64,

    /// Quiz time, in seconds
    pub quiz_duration: u64,

    /// When grading happened
    pub graded_at: Time,
}

/// A quiz record: draft until `outcome` is set, graded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    /// Unique identifier
    pub id: QuizRecordId,

    /// Key of the reading passage this quiz belongs to
    pub article_id: String,

    /// When the draft was created
    pub created_at: Time,

    /// Questions frozen at creation time
    pub questions: QuestionSet,

    /// Content level the passage was written at, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,

    /// Seconds spent reading before the quiz
    #[serde(default)]
    pub reading_duration: u64,

    /// Grading outcome; `None` while draft
    #[serde(default)]
    pub outcome: Option<QuizOutcome>,
}

impl QuizSession {
    /// Create a draft record.
    pub fn draft(article_id: impl Into<String>, questions: QuestionSet) -> Self {
        Self {
            id: QuizRecordId::new(),
            article_id: article_id.into(),
            created_at: chrono::Utc::now(),
            questions,
            difficulty_level: None,
            reading_duration: 0,
            outcome: None,
        }
    }

    /// Whether the record has already been graded.
    pub fn is_graded(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_deserializes_untagged() {
        let text: Answer = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(text, Answer::Text("B".to_string()));

        let list: Answer = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(list, Answer::List(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_question_defaults_from_json() {
        let json = r#"{"id":"v1","stem":"Eat an apple","answer":"B","target_word":"apple"}"#;
        let q: Question = serde_json::from_str(json).unwrap();

        assert_eq!(q.kind, QuestionKind::Generic);
        assert!(q.options.is_empty());
        assert_eq!(q.target_word.as_deref(), Some("apple"));
    }

    #[test]
    fn test_draft_is_ungraded() {
        let questions = QuestionSet {
            reading: vec![Question::new("r1", "Who?", "A")],
            vocabulary: vec![],
        };
        let record = QuizSession::draft("article-1", questions);

        assert!(!record.is_graded());
        assert_eq!(record.questions.len(), 1);
        assert_eq!(record.reading_duration, 0);
        assert!(record.difficulty_level.is_none());
    }

    #[test]
    fn test_record_without_level_still_loads() {
        let record = QuizSession::draft("article-1", QuestionSet::default());
        let mut json = serde_json::to_value(&record).unwrap();
        assert!(json.get("difficulty_level").is_none());

        json["difficulty_level"] = serde_json::json!("L3");
        let leveled: QuizSession = serde_json::from_value(json).unwrap();
        assert_eq!(leveled.difficulty_level, Some(DifficultyLevel::L3));
    }
}
