//! Local embedding provider

use async_trait::async_trait;

use yeneta_core::{EmbeddingProvider, Error, Result};

use crate::ranker::tokenize;

/// Deterministic feature-hashing embedder
///
/// Each term is hashed with md5 into one of `dimension` buckets with a signed
/// weight; the resulting vector is L2-normalised. Good enough to run the demo
/// without a hosted embedding model, and stable across runs and platforms.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub const DEFAULT_DIMENSION: usize = 384;

    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidConfiguration(
                "embedding dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Compute the embedding synchronously
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimension];

        for term in tokenize(text) {
            let digest = md5::compute(term.as_bytes());
            let bytes = digest.0;
            let bucket = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
                % self.dimension;
            let sign = if bytes[4] & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut embedding {
                *value /= norm;
            }
        }

        embedding
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: Self::DEFAULT_DIMENSION,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::cosine_similarity;

    #[test]
    fn test_embedding_has_fixed_length_and_unit_norm() {
        let embedder = HashEmbedder::default();
        let v = embedder.embed_text("Photosynthesis happens in the leaves");
        assert_eq!(v.len(), HashEmbedder::DEFAULT_DIMENSION);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new(64).unwrap();
        assert_eq!(embedder.embed_text("fractions"), embedder.embed_text("fractions"));
    }

    #[test]
    fn test_related_texts_are_closer() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed_text("how do plants use photosynthesis");
        let related = embedder.embed_text("plants use photosynthesis to make sugar");
        let unrelated = embedder.embed_text("the french revolution began in 1789");
        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_empty_text_gives_zero_vector() {
        let embedder = HashEmbedder::new(8).unwrap();
        assert!(embedder.embed_text("...").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(HashEmbedder::new(0), Err(Error::InvalidConfiguration(_))));
    }
}
