//! lexis CLI - adaptive vocabulary study engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexis_core::{
    QuestionSet, QuizRecordId, QuizSession, SettingsPatch, UserAnswers, Word, WordStatus,
};
use lexis_learning::{overview, select_words_for_article, StudySessionService};
use lexis_storage::{JsonStorage, SettingsStore, WordStore};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "Adaptive vocabulary study engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory for the JSON store
    #[arg(short, long, global = true, default_value = ".lexis")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a word
    Add {
        /// Spelling
        spelling: String,
        /// Meaning
        meaning: String,
    },
    /// Import words from a JSON array of {spelling, meaning}
    Import {
        /// JSON file
        file: PathBuf,
    },
    /// List words
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
    /// Pick words for the next article
    Select {
        /// Number of words (defaults to the daily new-word limit)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Store a draft quiz record from generated questions
    Draft {
        /// JSON file with {reading: [...], vocabulary: [...]}
        questions: PathBuf,
        /// Reading passage key
        #[arg(long)]
        article: String,
        /// Seconds spent reading
        #[arg(long, default_value = "0")]
        reading_secs: u64,
    },
    /// Grade a quiz record
    Submit {
        /// Quiz record ID
        record_id: String,
        /// JSON file with {reading: {...}, vocabulary: {...}}
        #[arg(long)]
        answers: PathBuf,
        /// Seconds spent on the quiz
        #[arg(long, default_value = "0")]
        quiz_secs: u64,
    },
    /// Show progress statistics
    Stats,
    /// Reset every word to New
    Reset,
    /// Show the current difficulty level
    Difficulty,
    /// Show or set the daily new-word limit
    Limit {
        /// New limit
        value: Option<u32>,
    },
}

#[derive(Deserialize)]
struct ImportedWord {
    spelling: String,
    meaning: String,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let storage = Arc::new(JsonStorage::new(&cli.data_dir).await?);

    match cli.command {
        Commands::Add { spelling, meaning } => {
            let word = Word::new(spelling, meaning);
            storage.add_word(&word).await?;
            println!("Added word: {} - {}", word.id, word.spelling);
        }
        Commands::Import { file } => {
            let imported: Vec<ImportedWord> = read_json_file(&file).await?;
            let words = imported
                .into_iter()
                .map(|w| Word::new(w.spelling, w.meaning))
                .collect();
            let (added, skipped) = storage.import_words(words).await?;
            info!("Imported {} words, skipped {} duplicates", added, skipped);
            println!("Added {}, skipped {}", added, skipped);
        }
        Commands::List { status } => {
            let status = status
                .map(|s| s.parse::<WordStatus>())
                .transpose()?;
            let words: Vec<Word> = storage
                .get_all()
                .await?
                .into_iter()
                .filter(|w| status.map_or(true, |s| w.status == s))
                .collect();

            println!("Words ({})", words.len());
            for word in words {
                println!("  {} | {:8} | {:>4}d | {}",
                    word.id,
                    word.status,
                    word.interval,
                    word.spelling,
                );
            }
        }
        Commands::Select { count } => {
            let count = match count {
                Some(count) => count,
                None => storage.get().await?.daily_new_limit as usize,
            };
            let words = storage.get_all().await?;
            let selected = select_words_for_article(&words, count);
            println!("Selected {} of {} words", selected.len(), words.len());
            for word in selected {
                println!("  {} ({}) - {}", word.spelling, word.status, word.meaning);
            }
        }
        Commands::Draft { questions, article, reading_secs } => {
            let questions: QuestionSet = read_json_file(&questions).await?;
            let mut record = QuizSession::draft(article, questions);
            record.reading_duration = reading_secs;
            let record = storage.create_record(record).await?;
            println!(
                "Draft quiz record: {} ({} questions, {})",
                record.id,
                record.questions.len(),
                record
                    .difficulty_level
                    .map_or_else(|| "no level".to_string(), |l| l.to_string()),
            );
        }
        Commands::Submit { record_id, answers, quiz_secs } => {
            let record_id: QuizRecordId = record_id
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid quiz record ID"))?;
            let answers: UserAnswers = read_json_file(&answers).await?;
            let target_words = storage.get_all().await?;

            let service = StudySessionService::new(storage.clone(), storage.clone(), storage.clone());
            let summary = service
                .submit_quiz_session(record_id, answers, &target_words, quiz_secs)
                .await?;

            println!("Quiz record: {}", summary.record_id);
            println!("  Score: {}", summary.score);
            match summary.new_difficulty {
                Some(level) => println!("  Difficulty: now {}", level),
                None => println!("  Difficulty: unchanged"),
            }
            for (spelling, correct) in &summary.word_results {
                println!("  {} {}", if *correct { "+" } else { "-" }, spelling);
            }
        }
        Commands::Stats => {
            let words = storage.get_all().await?;
            let records = storage.list_records().await?;
            let stats = overview(&words, &records);

            println!("lexis Status");
            for (status, count) in &stats.word_counts {
                println!("  {}: {}", status, count);
            }
            println!("  Graded quizzes: {}", stats.quizzes.quizzes);
            println!("  Avg quiz seconds/question: {}", stats.quizzes.avg_quiz_secs_per_question);
            println!("  Level   | Quizzes | 0-59 | 60-79 | 80-100 | s/question");
            for (level, q) in &stats.by_level {
                println!("  {:7} | {:>7} | {:>4} | {:>5} | {:>6} | {:>10}",
                    level,
                    q.quizzes,
                    q.score_distribution.low,
                    q.score_distribution.mid,
                    q.score_distribution.high,
                    q.avg_quiz_secs_per_question,
                );
            }
        }
        Commands::Reset => {
            let count = storage.reset_progress().await?;
            println!("Reset {} words", count);
        }
        Commands::Difficulty => {
            let settings = storage.get().await?;
            println!("Difficulty: {}", settings.difficulty_level);
        }
        Commands::Limit { value } => {
            if let Some(limit) = value {
                storage
                    .save(&SettingsPatch {
                        daily_new_limit: Some(limit),
                        ..Default::default()
                    })
                    .await?;
                info!("Daily new-word limit set to {}", limit);
            }
            let settings = storage.get().await?;
            println!("Daily new-word limit: {}", settings.daily_new_limit);
        }
    }

    Ok(())
}

async fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
