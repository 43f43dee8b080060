//! Storage abstraction and implementations for lexis.
//!
//! This crate provides trait-based word, quiz record and settings stores
//! with a JSON file backend and an in-memory backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{WordStore, QuizRecordStore, SettingsStore, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::{MemoryStorage, Mutation};
