//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Turns text into a fixed-length vector for similarity comparison
///
/// Implementations report failures as [`crate::Error::RetrievalUnavailable`]
/// with the embedding stage so callers can apply their fallback policy.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
