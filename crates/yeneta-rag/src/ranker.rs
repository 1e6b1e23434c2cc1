//! Hybrid lexical/semantic passage ranker

use std::collections::BTreeSet;

use yeneta_core::{
    EmbeddingProvider, Error, Passage, RagConfig, RankedResult, Result, RetrievalStage,
    ScoredPassage, validate_weight,
};

/// Lowercased alphanumeric terms of a text
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fraction of distinct query terms that occur in the passage, in `[0, 1]`
pub fn lexical_score(query_terms: &BTreeSet<String>, passage_text: &str) -> f32 {
    if query_terms.is_empty() {
        return 0.0;
    }

    let passage_terms: BTreeSet<String> = tokenize(passage_text).into_iter().collect();
    let matches = query_terms
        .iter()
        .filter(|term| passage_terms.contains(*term))
        .count();

    matches as f32 / query_terms.len() as f32
}

/// Cosine similarity; 0 for mismatched lengths or zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// `weight * semantic + (1 - weight) * lexical`
pub fn combine(semantic: f32, lexical: f32, weight: f32) -> f32 {
    weight * semantic + (1.0 - weight) * lexical
}

/// Per-candidate score inputs
#[derive(Debug, Clone)]
pub struct ScoreComponents {
    pub passage: Passage,
    pub lexical: f32,
    /// `None` when no query embedding is available
    pub semantic: Option<f32>,
}

/// Sort descending by score with ascending id as tie-break, then keep `k`
pub fn order_and_truncate(mut entries: Vec<ScoredPassage>, k: usize) -> RankedResult {
    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.passage.id.cmp(&b.passage.id))
    });
    entries.truncate(k);
    RankedResult { entries }
}

/// Ranks candidate passages for a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    k: usize,
    semantic_weight: f32,
}

impl Ranker {
    pub fn new(k: usize, semantic_weight: f32) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfiguration(
                "k must be at least 1".to_string(),
            ));
        }
        validate_weight(semantic_weight)?;
        Ok(Self { k, semantic_weight })
    }

    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(config.top_k, config.semantic_weight)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn semantic_weight(&self) -> f32 {
        self.semantic_weight
    }

    /// Embed the query and rank candidates by combined score
    ///
    /// An empty candidate set short-circuits to an empty result without
    /// calling the embedding provider.
    pub async fn rank<E>(
        &self,
        embedder: &E,
        query_text: &str,
        candidates: Vec<Passage>,
    ) -> Result<RankedResult>
    where
        E: EmbeddingProvider + ?Sized,
    {
        ensure_query(query_text)?;
        if candidates.is_empty() {
            return Ok(RankedResult::empty());
        }

        let query_embedding = embedder
            .embed(query_text)
            .await
            .map_err(|e| e.into_retrieval(RetrievalStage::Embedding))?;

        Ok(self.rank_with_embedding(query_text, &query_embedding, candidates))
    }

    /// Rank with an already computed query embedding
    pub fn rank_with_embedding(
        &self,
        query_text: &str,
        query_embedding: &[f32],
        candidates: Vec<Passage>,
    ) -> RankedResult {
        let query_terms: BTreeSet<String> = tokenize(query_text).into_iter().collect();
        let components = candidates
            .into_iter()
            .map(|passage| ScoreComponents {
                lexical: lexical_score(&query_terms, &passage.text),
                semantic: Some(cosine_similarity(query_embedding, &passage.embedding)),
                passage,
            })
            .collect();
        self.rank_components(components)
    }

    /// Rank by lexical score alone, for when no query embedding is available
    pub fn rank_lexical(&self, query_text: &str, candidates: Vec<Passage>) -> RankedResult {
        let query_terms: BTreeSet<String> = tokenize(query_text).into_iter().collect();
        let components = candidates
            .into_iter()
            .map(|passage| ScoreComponents {
                lexical: lexical_score(&query_terms, &passage.text),
                semantic: None,
                passage,
            })
            .collect();
        self.rank_components(components)
    }

    /// Combine precomputed scores, order and truncate
    pub fn rank_components(&self, components: Vec<ScoreComponents>) -> RankedResult {
        let entries = components
            .into_iter()
            .map(|c| {
                let score = match c.semantic {
                    Some(semantic) => combine(semantic, c.lexical, self.semantic_weight),
                    None => c.lexical,
                };
                ScoredPassage {
                    passage: c.passage,
                    score,
                }
            })
            .collect();
        order_and_truncate(entries, self.k)
    }
}

/// Rank `candidates` for `query_text`, keeping the top `k` by blended score
pub async fn rank<E>(
    embedder: &E,
    query_text: &str,
    candidates: Vec<Passage>,
    k: usize,
    weight: f32,
) -> Result<RankedResult>
where
    E: EmbeddingProvider + ?Sized,
{
    Ranker::new(k, weight)?
        .rank(embedder, query_text, candidates)
        .await
}

fn ensure_query(query_text: &str) -> Result<()> {
    if query_text.trim().is_empty() {
        return Err(Error::InvalidInput("query text is empty".to_string()));
    }
    Ok(())
}
