//! Retrieval, ranking and prompt composition for the Yeneta tutor
//!
//! This crate provides the ranker and prompt composer, a local in-memory
//! content store with a hashing embedder, document ingestion, session stores,
//! an answer self-check, and the pipeline that ties them to an answer service.

mod composer;
mod content_store;
mod embedder;
mod ingest;
mod pipeline;
mod ranker;
mod reflection;
mod samples;
mod session;

#[cfg(test)]
mod tests;

pub use composer::{NO_SUPPORTING_MATERIAL, compose, compose_with_codes};
pub use content_store::LocalContentStore;
pub use embedder::HashEmbedder;
pub use ingest::{PassageIngestor, chunk_text, document_from_file};
pub use pipeline::{TutorAnswer, TutorPipeline};
pub use ranker::{Ranker, ScoreComponents, cosine_similarity, lexical_score, rank, tokenize};
pub use reflection::{
    MAX_ANSWER_CHARS, MIN_ANSWER_CHARS, SAFETY_PENALTY, ValidationReport, validate_answer,
};
pub use samples::sample_documents;
pub use session::{InMemorySessionStore, JsonlSessionStore};

// Re-export core types for convenience
pub use yeneta_core::{
    AnswerService, ComposedPrompt, ContentStore, EmbeddingProvider, Error, Passage, Query,
    RagConfig, RankedResult, Result, SessionStore,
};
