//! Content store trait

use async_trait::async_trait;

use crate::{Passage, PassageFilter, Result};

/// Read side of a passage store (e.g., an in-memory index or a hosted vector DB)
///
/// Both searches return at most `limit` passages matching `filter`. Failures
/// are reported as [`crate::Error::RetrievalUnavailable`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Passages closest to the query embedding
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        filter: &PassageFilter,
        limit: usize,
    ) -> Result<Vec<Passage>>;

    /// Passages sharing terms with the query text, used when embeddings are unavailable
    async fn keyword_search(
        &self,
        query_text: &str,
        filter: &PassageFilter,
        limit: usize,
    ) -> Result<Vec<Passage>>;
}
