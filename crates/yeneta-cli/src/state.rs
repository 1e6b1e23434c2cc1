//! Per-conversation REPL state

use uuid::Uuid;

use yeneta_core::{
    ConversationTurn, Difficulty, Language, Query, Result, SourceRef, detect_language,
};

use crate::commands::ReplCommand;

/// Earlier turns carried into the next question
pub const MAX_HISTORY_TURNS: usize = 10;

/// Settings and memory of one interactive conversation
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Fixed answer language; `None` detects it from each question
    pub language: Option<Language>,
    pub difficulty: Difficulty,
    pub subject: Option<String>,
    pub conversation_id: Uuid,
    history: Vec<ConversationTurn>,
    last_sources: Vec<SourceRef>,
}

impl ConversationState {
    pub fn new(
        language: Option<Language>,
        difficulty: Difficulty,
        subject: Option<String>,
    ) -> Self {
        Self {
            language,
            difficulty,
            subject,
            conversation_id: Uuid::new_v4(),
            history: Vec::new(),
            last_sources: Vec::new(),
        }
    }

    /// Build the query for the next question, carrying the recent turns
    pub fn query(&self, text: &str) -> Result<Query> {
        let language = self.language.unwrap_or_else(|| detect_language(text));
        let mut query = Query::new(text, language, self.difficulty)?
            .with_conversation(self.conversation_id)
            .with_history(self.history.clone());
        if let Some(ref subject) = self.subject {
            query = query.with_subject(subject.clone());
        }
        Ok(query)
    }

    /// Remember an answered question
    pub fn record(&mut self, question: &str, answer: &str, sources: Vec<SourceRef>) {
        self.history.push(ConversationTurn {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        if self.history.len() > MAX_HISTORY_TURNS {
            let excess = self.history.len() - MAX_HISTORY_TURNS;
            self.history.drain(..excess);
        }
        self.last_sources = sources;
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn last_sources(&self) -> &[SourceRef] {
        &self.last_sources
    }

    /// Apply a settings command; returns false for commands that are not settings
    pub fn apply(&mut self, command: &ReplCommand) -> bool {
        match command {
            ReplCommand::SetLevel(difficulty) => self.difficulty = *difficulty,
            ReplCommand::SetLanguage(language) => self.language = *language,
            ReplCommand::SetSubject(subject) => self.subject = subject.clone(),
            _ => return false,
        }
        true
    }
}
