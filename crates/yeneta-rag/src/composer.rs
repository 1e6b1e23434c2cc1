//! Prompt composition
//!
//! The composed prompt is laid out as: system instruction, supporting
//! material (each passage tagged with its source id), earlier conversation
//! turns, and finally the question verbatim. The whole text is kept within a
//! character budget by dropping passages from the lowest-ranked end, then
//! older conversation turns; a passage is never cut in half.

use yeneta_core::{
    ComposedPrompt, ConversationTurn, Difficulty, Error, Language, Query, RankedResult, Result,
    ScoredPassage,
};

/// Marker placed in the instruction when no passage supports the answer
pub const NO_SUPPORTING_MATERIAL: &str = "NO SUPPORTING MATERIAL FOUND";

fn system_instruction(language: Language, difficulty: Difficulty, grounded: bool) -> String {
    let profile = difficulty.profile();
    let mut lines = vec![
        "You are Yeneta, an AI study assistant helping a student.".to_string(),
        format!(
            "Respond in {} ({}).",
            language.display_name(),
            language.native_name()
        ),
        format!(
            "Learning level: {} (complexity {}/3). Keep sentences under {} words.",
            difficulty.display_name(),
            profile.complexity,
            profile.max_sentence_words
        ),
    ];

    if profile.use_examples {
        lines.push("Include a short worked example.".to_string());
    }
    if profile.use_analogies {
        lines.push("Use an everyday analogy to explain the idea.".to_string());
    }
    if profile.scaffolding {
        lines.push(
            "Break the explanation into small steps and end by checking the student's understanding."
                .to_string(),
        );
    }

    if grounded {
        lines.push(
            "Base your answer on the supporting material below and cite it using the [source: id] tags."
                .to_string(),
        );
    } else {
        lines.push(format!(
            "{}. Answer from general knowledge and tell the student this answer is lower-confidence because no course material supported it.",
            NO_SUPPORTING_MATERIAL
        ));
    }

    lines.join("\n")
}

fn material_section(passages: &[ScoredPassage]) -> String {
    let blocks: Vec<String> = passages
        .iter()
        .map(|entry| format!("[source: {}]\n{}", entry.passage.id, entry.passage.text))
        .collect();
    format!("Supporting material:\n{}", blocks.join("\n\n"))
}

fn history_section(turns: &[ConversationTurn]) -> String {
    let lines: Vec<String> = turns
        .iter()
        .map(|turn| format!("Student: {}\nTutor: {}", turn.question, turn.answer))
        .collect();
    format!("Earlier in this conversation:\n{}", lines.join("\n"))
}

fn assemble(
    language: Language,
    difficulty: Difficulty,
    passages: &[ScoredPassage],
    turns: &[ConversationTurn],
    question: &str,
) -> String {
    let mut sections = vec![system_instruction(language, difficulty, !passages.is_empty())];
    if !passages.is_empty() {
        sections.push(material_section(passages));
    }
    if !turns.is_empty() {
        sections.push(history_section(turns));
    }
    sections.push(format!("Question: {}", question));
    sections.join("\n\n")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Build the prompt for `query` from its ranked passages
///
/// Fails with [`Error::InvalidConfiguration`] when `max_length` cannot hold
/// the instruction and the question on their own.
pub fn compose(
    query: &Query,
    ranked: &RankedResult,
    language: Language,
    difficulty: Difficulty,
    max_length: usize,
) -> Result<ComposedPrompt> {
    let fits = |passages: &[ScoredPassage], turns: &[ConversationTurn]| {
        char_len(&assemble(language, difficulty, passages, turns, &query.text)) <= max_length
    };

    let no_turns: &[ConversationTurn] = &[];
    let kept = (0..=ranked.entries.len())
        .rev()
        .find(|&n| fits(&ranked.entries[..n], no_turns))
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "prompt budget of {} characters cannot hold the instruction and question",
                max_length
            ))
        })?;
    let passages = &ranked.entries[..kept];

    let history = &query.history;
    let first_turn = (0..=history.len())
        .find(|&start| fits(passages, &history[start..]))
        .unwrap_or(history.len());
    let turns = &history[first_turn..];

    if kept < ranked.entries.len() {
        tracing::debug!(
            dropped = ranked.entries.len() - kept,
            max_length,
            "passages dropped to fit prompt budget"
        );
    }

    Ok(ComposedPrompt {
        text: assemble(language, difficulty, passages, turns, &query.text),
        included_sources: passages.iter().map(|e| e.passage.id.clone()).collect(),
        grounded: !passages.is_empty(),
    })
}

/// Parse language and difficulty codes, then compose
pub fn compose_with_codes(
    query: &Query,
    ranked: &RankedResult,
    language_code: &str,
    difficulty_code: &str,
    max_length: usize,
) -> Result<ComposedPrompt> {
    let language = Language::from_code(language_code)?;
    let difficulty = Difficulty::from_code(difficulty_code)?;
    compose(query, ranked, language, difficulty, max_length)
}
