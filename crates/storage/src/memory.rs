//! In-memory storage backend.
//!
//! Keeps everything in process memory and records every mutating call, so
//! callers can check exactly which writes an operation performed.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use lexis_core::{
    QuizOutcome, QuizRecordId, QuizSession, Settings, SettingsPatch, Word, WordId, WordPatch,
};
use tokio::sync::Mutex;

use super::{QuizRecordStore, Result, SettingsStore, StorageError, WordStore};

/// A mutating call received by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// `WordStore::update`
    Word(WordId, WordPatch),
    /// `QuizRecordStore::update`
    Record(QuizRecordId),
    /// `SettingsStore::save`
    Settings(SettingsPatch),
}

#[derive(Default)]
struct State {
    words: Vec<Word>,
    records: BTreeMap<QuizRecordId, QuizSession>,
    settings: Settings,
    mutations: Vec<Mutation>,
    failing_words: HashSet<WordId>,
}

/// In-process storage for tests and embedding callers.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    /// Create empty storage with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed words, keeping insertion order.
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.state.get_mut().words = words;
        self
    }

    /// Seed a quiz record.
    pub fn with_record(mut self, record: QuizSession) -> Self {
        self.state.get_mut().records.insert(record.id, record);
        self
    }

    /// Seed settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.state.get_mut().settings = settings;
        self
    }

    /// Make updates to one word fail with an I/O error.
    pub fn with_failing_word(mut self, id: WordId) -> Self {
        self.state.get_mut().failing_words.insert(id);
        self
    }

    /// Every mutating call received so far, in order.
    pub async fn mutations(&self) -> Vec<Mutation> {
        self.state.lock().await.mutations.clone()
    }

    /// Snapshot of a stored record.
    pub async fn record(&self, id: QuizRecordId) -> Option<QuizSession> {
        self.state.lock().await.records.get(&id).cloned()
    }

    /// Snapshot of the stored words.
    pub async fn words(&self) -> Vec<Word> {
        self.state.lock().await.words.clone()
    }
}

#[async_trait]
impl WordStore for MemoryStorage {
    async fn get_all(&self) -> Result<Vec<Word>> {
        Ok(self.state.lock().await.words.clone())
    }

    async fn update(&self, id: WordId, patch: &WordPatch) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.failing_words.contains(&id) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("simulated failure updating word {}", id),
            )));
        }
        let word = state
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("word {}", id)))?;
        word.apply(patch);
        state.mutations.push(Mutation::Word(id, patch.clone()));
        Ok(())
    }
}

#[async_trait]
impl QuizRecordStore for MemoryStorage {
    async fn get_by_id(&self, id: QuizRecordId) -> Result<Option<QuizSession>> {
        Ok(self.state.lock().await.records.get(&id).cloned())
    }

    async fn update(&self, id: QuizRecordId, outcome: &QuizOutcome) -> Result<()> {
        let mut state = self.state.lock().await;
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("quiz record {}", id)))?;
        record.outcome = Some(outcome.clone());
        state.mutations.push(Mutation::Record(id));
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStorage {
    async fn get(&self) -> Result<Settings> {
        Ok(self.state.lock().await.settings.clone())
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<()> {
        let mut state = self.state.lock().await;
        state.settings.apply(patch);
        state.mutations.push(Mutation::Settings(patch.clone()));
        Ok(())
    }
}
