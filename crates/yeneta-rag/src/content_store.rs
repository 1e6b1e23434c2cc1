//! In-memory content store

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use yeneta_core::{
    ContentStore, Error, Passage, PassageFilter, Result, RetrievalStage, ScoredPassage,
};

use crate::ranker::{cosine_similarity, lexical_score, order_and_truncate, tokenize};

/// Local in-memory passage store
///
/// Passages are keyed by id in a sorted map so scans are deterministic.
pub struct LocalContentStore {
    passages: RwLock<BTreeMap<String, Passage>>,
}

impl LocalContentStore {
    pub fn new() -> Self {
        Self {
            passages: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store a passage; passages are immutable so an existing id is rejected
    pub fn insert(&self, passage: Passage) -> Result<()> {
        let mut passages = self
            .passages
            .write()
            .map_err(|e| Error::ContentStore(format!("Lock error: {}", e)))?;

        if passages.contains_key(&passage.id) {
            return Err(Error::ContentStore(format!(
                "passage '{}' already exists",
                passage.id
            )));
        }
        passages.insert(passage.id.clone(), passage);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Passage>> {
        let passages = self
            .passages
            .read()
            .map_err(|e| Error::ContentStore(format!("Lock error: {}", e)))?;
        Ok(passages.get(id).cloned())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut passages = self
            .passages
            .write()
            .map_err(|e| Error::ContentStore(format!("Lock error: {}", e)))?;
        Ok(passages.remove(id).is_some())
    }

    pub fn count(&self) -> Result<usize> {
        let passages = self
            .passages
            .read()
            .map_err(|e| Error::ContentStore(format!("Lock error: {}", e)))?;
        Ok(passages.len())
    }

    pub fn clear(&self) -> Result<()> {
        let mut passages = self
            .passages
            .write()
            .map_err(|e| Error::ContentStore(format!("Lock error: {}", e)))?;
        passages.clear();
        Ok(())
    }

    fn scan<F>(
        &self,
        stage: RetrievalStage,
        filter: &PassageFilter,
        limit: usize,
        score: F,
    ) -> Result<Vec<Passage>>
    where
        F: Fn(&Passage) -> Option<f32>,
    {
        let passages = self
            .passages
            .read()
            .map_err(|e| Error::retrieval(stage, format!("Lock error: {}", e)))?;

        let scored = passages
            .values()
            .filter(|p| filter.matches(p))
            .filter_map(|p| {
                score(p).map(|score| ScoredPassage {
                    passage: p.clone(),
                    score,
                })
            })
            .collect();

        Ok(order_and_truncate(scored, limit)
            .entries
            .into_iter()
            .map(|e| e.passage)
            .collect())
    }
}

impl Default for LocalContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        filter: &PassageFilter,
        limit: usize,
    ) -> Result<Vec<Passage>> {
        self.scan(RetrievalStage::SimilaritySearch, filter, limit, |p| {
            Some(cosine_similarity(query_embedding, &p.embedding))
        })
    }

    async fn keyword_search(
        &self,
        query_text: &str,
        filter: &PassageFilter,
        limit: usize,
    ) -> Result<Vec<Passage>> {
        let query_terms: BTreeSet<String> = tokenize(query_text).into_iter().collect();
        self.scan(RetrievalStage::KeywordSearch, filter, limit, |p| {
            let score = lexical_score(&query_terms, &p.text);
            (score > 0.0).then_some(score)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yeneta_core::{Difficulty, Language};

    fn passage(id: &str, text: &str, subject: &str, embedding: Vec<f32>) -> Passage {
        Passage {
            id: id.to_string(),
            text: text.to_string(),
            subject: subject.to_string(),
            language: Language::English,
            difficulty: Difficulty::Intermediate,
            embedding,
        }
    }

    fn store() -> LocalContentStore {
        let store = LocalContentStore::new();
        store
            .insert(passage("m1", "Fractions describe parts of a whole", "math", vec![1.0, 0.0]))
            .unwrap();
        store
            .insert(passage(
                "m2",
                "Decimals are fractions with denominators of ten",
                "math",
                vec![0.8, 0.6],
            ))
            .unwrap();
        store
            .insert(passage("b1", "Cells are the unit of life", "biology", vec![0.0, 1.0]))
            .unwrap();
        store
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let store = store();
        let err = store
            .insert(passage("m1", "other", "math", vec![]))
            .unwrap_err();
        assert!(matches!(err, Error::ContentStore(_)));
        assert_eq!(store.get("m1").unwrap().unwrap().text, "Fractions describe parts of a whole");
    }

    #[test]
    fn test_delete_and_count() {
        let store = store();
        assert_eq!(store.count().unwrap(), 3);
        assert!(store.delete("b1").unwrap());
        assert!(!store.delete("b1").unwrap());
        assert_eq!(store.count().unwrap(), 2);
        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_similarity_search_orders_and_limits() {
        let store = store();
        let results = store
            .similarity_search(&[1.0, 0.0], &PassageFilter::default(), 2)
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_similarity_search_applies_filter() {
        let store = store();
        let filter = PassageFilter {
            subject: Some("biology".to_string()),
            ..Default::default()
        };
        let results = store.similarity_search(&[1.0, 0.0], &filter, 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b1");
    }

    #[tokio::test]
    async fn test_keyword_search_skips_non_matching() {
        let store = store();
        let results = store
            .keyword_search("decimals fractions", &PassageFilter::default(), 10)
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
    }
}
