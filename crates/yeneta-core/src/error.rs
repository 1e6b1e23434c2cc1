//! Error types for the Yeneta tutor core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Retrieval stage that failed, reported with [`Error::RetrievalUnavailable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStage {
    /// Computing the query embedding
    Embedding,
    /// Vector similarity search against the content store
    SimilaritySearch,
    /// Keyword search used by the lexical-only fallback
    KeywordSearch,
}

impl std::fmt::Display for RetrievalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RetrievalStage::Embedding => "embedding",
            RetrievalStage::SimilaritySearch => "similarity search",
            RetrievalStage::KeywordSearch => "keyword search",
        };
        f.write_str(name)
    }
}

/// Core error types for the Yeneta tutor system
#[derive(Error, Debug)]
pub enum Error {
    #[error("Retrieval unavailable during {stage}: {message}")]
    RetrievalUnavailable {
        stage: RetrievalStage,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Answer service failure: {0}")]
    AnswerServiceFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Content store error: {0}")]
    ContentStore(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a retrieval failure at the given stage
    pub fn retrieval(stage: RetrievalStage, message: impl Into<String>) -> Self {
        Error::RetrievalUnavailable {
            stage,
            message: message.into(),
        }
    }

    /// Whether the caller may recover by falling back to a weaker retrieval mode
    pub fn is_recoverable_retrieval(&self) -> bool {
        matches!(self, Error::RetrievalUnavailable { .. })
    }

    /// Attribute a collaborator failure to a retrieval stage
    ///
    /// Configuration and input errors pass through unchanged so they are
    /// never mistaken for an outage and downgraded by a fallback.
    pub fn into_retrieval(self, stage: RetrievalStage) -> Self {
        match self {
            Error::RetrievalUnavailable { .. }
            | Error::InvalidConfiguration(_)
            | Error::InvalidInput(_) => self,
            other => Error::retrieval(stage, other.to_string()),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
