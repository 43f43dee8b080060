//! JSON file storage implementation.
//!
//! Stores one JSON file per word and per quiz record under a data directory,
//! plus a single `settings.json`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lexis_core::{
    QuizOutcome, QuizRecordId, QuizSession, Settings, SettingsPatch, Word, WordId, WordPatch,
};
use super::{QuizRecordStore, Result, SettingsStore, StorageError, WordStore};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Arc<Mutex<()>>,
}

impl JsonStorage {
    /// Create storage, creating the `words/` and `records/` subdirectories
    /// when missing.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("words")).await?;
        fs::create_dir_all(root.join("records")).await?;

        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn word_path(&self, id: WordId) -> PathBuf {
        self.root.join("words").join(format!("{}.json", id))
    }
    fn record_path(&self, id: QuizRecordId) -> PathBuf {
        self.root.join("records").join(format!("{}.json", id))
    }
    fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    async fn write_word(&self, word: &Word) -> Result<()> {
        write_json(&self.word_path(word.id), word).await?;
        debug!("Wrote word {} ({})", word.spelling, word.id);
        Ok(())
    }

    async fn write_record(&self, record: &QuizSession) -> Result<()> {
        write_json(&self.record_path(record.id), record).await?;
        debug!("Wrote quiz record {}", record.id);
        Ok(())
    }

    async fn read_settings(&self) -> Result<Settings> {
        Ok(read_json(&self.settings_path()).await?.unwrap_or_default())
    }

    // === Word management ===

    /// Add a word. Spellings are unique as stored.
    pub async fn add_word(&self, word: &Word) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let existing: Vec<Word> = list_dir(&self.root.join("words")).await?;
        if existing.iter().any(|w| w.spelling == word.spelling) {
            return Err(StorageError::Other(format!(
                "word already exists: {}",
                word.spelling
            )));
        }
        self.write_word(word).await
    }

    /// Import words, skipping spellings already present (case-insensitive).
    ///
    /// Imported words start as New with a cleared schedule. Returns
    /// `(added, skipped)`.
    pub async fn import_words(&self, words: Vec<Word>) -> Result<(usize, usize)> {
        let _guard = self.write_lock.lock().await;
        let existing: Vec<Word> = list_dir(&self.root.join("words")).await?;
        let mut known: std::collections::HashSet<String> =
            existing.iter().map(|w| w.spelling.to_lowercase()).collect();

        let mut added = 0;
        let mut skipped = 0;
        for mut word in words {
            if !known.insert(word.spelling.to_lowercase()) {
                skipped += 1;
                continue;
            }
            word.reset_schedule();
            self.write_word(&word).await?;
            added += 1;
        }
        Ok((added, skipped))
    }

    /// Set every word back to New with a cleared schedule.
    pub async fn reset_progress(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let words: Vec<Word> = list_dir(&self.root.join("words")).await?;
        let count = words.len();
        for mut word in words {
            word.reset_schedule();
            self.write_word(&word).await?;
        }
        Ok(count)
    }

    // === Quiz record management ===

    /// Persist a draft record.
    ///
    /// A record without a difficulty level is stamped with the current
    /// settings level. Returns the record as stored.
    pub async fn create_record(&self, mut record: QuizSession) -> Result<QuizSession> {
        let _guard = self.write_lock.lock().await;
        if record.difficulty_level.is_none() {
            record.difficulty_level = Some(self.read_settings().await?.difficulty_level);
        }
        self.write_record(&record).await?;
        Ok(record)
    }

    /// List all records, oldest first.
    pub async fn list_records(&self) -> Result<Vec<QuizSession>> {
        let mut records = list_dir(&self.root.join("records")).await?;
        records.sort_by(|a: &QuizSession, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

#[async_trait::async_trait]
impl WordStore for JsonStorage {
    async fn get_all(&self) -> Result<Vec<Word>> {
        let mut words = list_dir(&self.root.join("words")).await?;
        words.sort_by(|a: &Word, b| a.id.cmp(&b.id));
        Ok(words)
    }

    async fn update(&self, id: WordId, patch: &WordPatch) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut word: Word = read_json(&self.word_path(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("word {}", id)))?;
        word.apply(patch);
        self.write_word(&word).await
    }
}

#[async_trait::async_trait]
impl QuizRecordStore for JsonStorage {
    async fn get_by_id(&self, id: QuizRecordId) -> Result<Option<QuizSession>> {
        read_json(&self.record_path(id)).await
    }

    async fn update(&self, id: QuizRecordId, outcome: &QuizOutcome) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut record: QuizSession = read_json(&self.record_path(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("quiz record {}", id)))?;
        record.outcome = Some(outcome.clone());
        self.write_record(&record).await
    }
}

#[async_trait::async_trait]
impl SettingsStore for JsonStorage {
    async fn get(&self) -> Result<Settings> {
        self.read_settings().await
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.read_settings().await?;
        settings.apply(patch);
        write_json(&self.settings_path(), &settings).await
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
