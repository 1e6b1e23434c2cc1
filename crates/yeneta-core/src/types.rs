//! Common types used across the Yeneta tutor system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Difficulty, Error, Language, Result};

/// An immutable unit of ingested educational content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    pub text: String,
    pub subject: String,
    pub language: Language,
    pub difficulty: Difficulty,
    pub embedding: Vec<f32>,
}

/// Metadata filter applied by the content store before ranking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageFilter {
    pub subject: Option<String>,
    pub language: Option<Language>,
    pub difficulty: Option<Difficulty>,
}

impl PassageFilter {
    /// Check whether a passage satisfies every set constraint
    pub fn matches(&self, passage: &Passage) -> bool {
        if let Some(ref subject) = self.subject {
            if !passage.subject.eq_ignore_ascii_case(subject) {
                return false;
            }
        }
        if let Some(language) = self.language {
            if passage.language != language {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if passage.difficulty != difficulty {
                return false;
            }
        }
        true
    }
}

/// One earlier exchange in the same conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

/// A single student request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub language: Language,
    pub difficulty: Difficulty,
    pub conversation_id: Option<Uuid>,
    pub subject: Option<String>,
    /// Earlier turns, oldest first
    pub history: Vec<ConversationTurn>,
}

impl Query {
    /// Create a query; the text must contain something other than whitespace
    pub fn new(
        text: impl Into<String>,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("question text is empty".to_string()));
        }

        Ok(Self {
            text,
            language,
            difficulty,
            conversation_id: None,
            subject: None,
            history: Vec::new(),
        })
    }

    pub fn with_conversation(mut self, conversation_id: Uuid) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// A passage paired with its combined relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub passage: Passage,
    pub score: f32,
}

/// Passages ordered by descending score, ties by ascending passage id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub entries: Vec<ScoredPassage>,
}

impl RankedResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.passage.id.as_str()).collect()
    }
}

/// The instruction handed to the answer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub text: String,
    /// Ids of the passages that fit inside the length budget, in rank order
    pub included_sources: Vec<String>,
    /// Whether the no-supporting-material instruction was used
    pub grounded: bool,
}

/// How supporting passages were obtained for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Lexical and semantic scores blended
    Hybrid,
    /// Embedding or similarity search failed; keyword matches only
    LexicalOnly,
    /// Retrieval failed and the answer relies on general knowledge
    NoContext,
}

/// Source reference kept with a conversation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub passage_id: String,
    pub score: f32,
}

/// Append-only log entry pairing a question with its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Uuid,
    pub conversation_id: Option<Uuid>,
    pub question: String,
    pub language: Language,
    pub difficulty: Difficulty,
    pub answer: String,
    pub sources: Vec<SourceRef>,
    pub retrieval_mode: RetrievalMode,
    pub created_at: DateTime<Utc>,
}
