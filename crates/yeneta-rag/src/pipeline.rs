//! Question answering pipeline

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use yeneta_core::{
    AnswerService, ComposedPrompt, ContentStore, ConversationRecord, EmbeddingProvider, Error,
    PassageFilter, Query, RagConfig, RankedResult, Result, RetrievalFallback, RetrievalMode,
    RetrievalStage, SessionStore, SourceRef,
};

use crate::composer::compose;
use crate::ranker::Ranker;
use crate::reflection::{ValidationReport, validate_answer};

/// Everything produced while answering one question
#[derive(Debug, Clone)]
pub struct TutorAnswer {
    pub answer: String,
    pub prompt: ComposedPrompt,
    pub ranked: RankedResult,
    pub retrieval_mode: RetrievalMode,
    pub record_id: Uuid,
    pub validation: ValidationReport,
}

impl TutorAnswer {
    /// Ranked passages that made it into the prompt
    pub fn cited_sources(&self) -> Vec<SourceRef> {
        cited(&self.ranked, &self.prompt)
    }
}

fn cited(ranked: &RankedResult, prompt: &ComposedPrompt) -> Vec<SourceRef> {
    ranked
        .entries
        .iter()
        .filter(|e| prompt.included_sources.contains(&e.passage.id))
        .map(|e| SourceRef {
            passage_id: e.passage.id.clone(),
            score: e.score,
        })
        .collect()
}

/// Retrieve, rank, compose, answer and log one question at a time
pub struct TutorPipeline<E, C, A, S>
where
    E: EmbeddingProvider + ?Sized,
    C: ContentStore + ?Sized,
    A: AnswerService + ?Sized,
    S: SessionStore + ?Sized,
{
    embedder: Arc<E>,
    store: Arc<C>,
    answers: Arc<A>,
    sessions: Arc<S>,
    ranker: Ranker,
    config: RagConfig,
}

impl<E, C, A, S> TutorPipeline<E, C, A, S>
where
    E: EmbeddingProvider + ?Sized,
    C: ContentStore + ?Sized,
    A: AnswerService + ?Sized,
    S: SessionStore + ?Sized,
{
    pub fn new(
        embedder: Arc<E>,
        store: Arc<C>,
        answers: Arc<A>,
        sessions: Arc<S>,
        config: RagConfig,
    ) -> Result<Self> {
        config.validate()?;
        let ranker = Ranker::from_config(&config)?;

        Ok(Self {
            embedder,
            store,
            answers,
            sessions,
            ranker,
            config,
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer a question and append the exchange to the session store
    pub async fn ask(&self, query: &Query) -> Result<TutorAnswer> {
        if query.text.trim().is_empty() {
            return Err(Error::InvalidInput("question text is empty".to_string()));
        }

        let filter = self.filter_for(query);
        let (ranked, retrieval_mode) = self.retrieve(query, &filter).await?;

        let prompt = compose(
            query,
            &ranked,
            query.language,
            query.difficulty,
            self.config.max_prompt_chars,
        )?;
        tracing::debug!(
            ranked = ranked.len(),
            included = prompt.included_sources.len(),
            chars = prompt.text.chars().count(),
            "prompt composed"
        );

        let answer = self.complete(&prompt.text).await?;

        let validation = validate_answer(&answer);
        tracing::debug!(
            safety_score = validation.safety_score,
            safety_issues = validation.safety_issues.len(),
            check_score = validation.check_score(),
            passed = validation.passed(),
            "answer validated"
        );

        let record = ConversationRecord {
            id: Uuid::new_v4(),
            conversation_id: query.conversation_id,
            question: query.text.clone(),
            language: query.language,
            difficulty: query.difficulty,
            answer: answer.clone(),
            sources: cited(&ranked, &prompt),
            retrieval_mode,
            created_at: Utc::now(),
        };
        self.sessions.append(&record).await?;

        Ok(TutorAnswer {
            answer,
            prompt,
            ranked,
            retrieval_mode,
            record_id: record.id,
            validation,
        })
    }

    fn filter_for(&self, query: &Query) -> PassageFilter {
        PassageFilter {
            subject: query.subject.clone(),
            language: self.config.match_language.then_some(query.language),
            difficulty: None,
        }
    }

    async fn retrieve(
        &self,
        query: &Query,
        filter: &PassageFilter,
    ) -> Result<(RankedResult, RetrievalMode)> {
        let err = match self.retrieve_hybrid(query, filter).await {
            Ok(ranked) => return Ok((ranked, RetrievalMode::Hybrid)),
            Err(e) if e.is_recoverable_retrieval() => e,
            Err(e) => return Err(e),
        };

        match self.config.fallback {
            RetrievalFallback::Abort => Err(err),
            RetrievalFallback::LexicalOnly => {
                tracing::warn!(
                    error = %err,
                    "semantic retrieval unavailable, using keyword matches"
                );
                let candidates = self
                    .within_retrieval_timeout(
                        RetrievalStage::KeywordSearch,
                        self.store
                            .keyword_search(&query.text, filter, self.config.fan_out),
                    )
                    .await?;
                Ok((
                    self.ranker.rank_lexical(&query.text, candidates),
                    RetrievalMode::LexicalOnly,
                ))
            }
            RetrievalFallback::NoContext => {
                tracing::warn!(error = %err, "retrieval unavailable, answering without context");
                Ok((RankedResult::empty(), RetrievalMode::NoContext))
            }
        }
    }

    async fn retrieve_hybrid(&self, query: &Query, filter: &PassageFilter) -> Result<RankedResult> {
        let embedding = self
            .within_retrieval_timeout(RetrievalStage::Embedding, self.embedder.embed(&query.text))
            .await?;

        let candidates = self
            .within_retrieval_timeout(
                RetrievalStage::SimilaritySearch,
                self.store
                    .similarity_search(&embedding, filter, self.config.fan_out),
            )
            .await?;

        Ok(self
            .ranker
            .rank_with_embedding(&query.text, &embedding, candidates))
    }

    async fn within_retrieval_timeout<T, F>(&self, stage: RetrievalStage, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.config.retrieval_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.into_retrieval(stage)),
            Err(_) => Err(Error::retrieval(
                stage,
                format!("timed out after {}", describe(self.config.retrieval_timeout)),
            )),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let answer = match tokio::time::timeout(
            self.config.answer_timeout,
            self.answers.complete(prompt),
        )
        .await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e @ Error::AnswerServiceFailure(_))) => return Err(e),
            Ok(Err(e)) => return Err(Error::AnswerServiceFailure(e.to_string())),
            Err(_) => {
                return Err(Error::AnswerServiceFailure(format!(
                    "timed out after {}",
                    describe(self.config.answer_timeout)
                )));
            }
        };

        if answer.trim().is_empty() {
            return Err(Error::AnswerServiceFailure(
                "answer service returned an empty completion".to_string(),
            ));
        }
        Ok(answer)
    }
}

fn describe(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}
