//! Core traits and types for Yeneta
//!
//! This crate defines the fundamental types used across the tutor: passages,
//! queries, ranked results and conversation records, plus narrow interfaces
//! for the external collaborators (embedding provider, content store, answer
//! service, session store) so the ranking and prompt logic stays testable.

pub mod answer;
pub mod config;
pub mod content_store;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod language;
pub mod session_store;
pub mod types;

#[cfg(test)]
mod tests;

pub use answer::AnswerService;
pub use config::{RagConfig, RetrievalFallback, validate_weight};
pub use content_store::ContentStore;
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result, RetrievalStage};
pub use ingest::{ChunkingConfig, IngestionReport, SourceDocument};
pub use language::{Difficulty, DifficultyProfile, Language, detect_language};
pub use session_store::SessionStore;
pub use types::*;
