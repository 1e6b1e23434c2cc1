//! Ingestion types

use serde::{Deserialize, Serialize};

use crate::{Difficulty, Language};

/// A source document to be split into passages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: String,
    pub text: String,
    pub subject: String,
    pub language: Language,
    pub difficulty: Difficulty,
}

/// Result of an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionReport {
    pub passages_stored: usize,
    pub passages_failed: usize,
    pub errors: Vec<String>,
}

impl IngestionReport {
    pub fn merge(&mut self, other: IngestionReport) {
        self.passages_stored += other.passages_stored;
        self.passages_failed += other.passages_failed;
        self.errors.extend(other.errors);
    }
}

/// Configuration for splitting documents into passages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
        }
    }
}
