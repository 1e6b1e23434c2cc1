//! Answer self-check
//!
//! Deterministic checks run on every answer before it reaches the student:
//! a safety scan for inappropriate terms and over-confident absolutes, plus
//! final checks on length, educational value and tone. Nothing here calls
//! the answer service again.

use std::collections::BTreeSet;

use crate::ranker::tokenize;

const INAPPROPRIATE_TERMS: &[&str] = &[
    "violence",
    "harmful",
    "dangerous",
    "illegal",
    "discriminatory",
    "offensive",
    "inappropriate",
];

const ABSOLUTE_TERMS: &[&str] = &[
    "always",
    "never",
    "all",
    "none",
    "guaranteed",
    "definitely",
    "certainly",
    "impossible",
];

const EDUCATIONAL_TERMS: &[&str] = &["explain", "understand", "learn", "study", "example"];

const ENCOURAGING_PHRASES: &[&str] = &["good", "great", "excellent", "well done", "keep up"];

/// Penalty applied to the safety score for each issue found
pub const SAFETY_PENALTY: f32 = 0.2;

/// Accepted answer length in characters
pub const MIN_ANSWER_CHARS: usize = 50;
pub const MAX_ANSWER_CHARS: usize = 2000;

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// `1 - 0.2 * issues`, floored at 0
    pub safety_score: f32,
    pub safety_issues: Vec<String>,
    pub length_appropriate: bool,
    pub no_inappropriate_content: bool,
    pub has_educational_value: bool,
    pub encouraging_tone: bool,
}

impl ValidationReport {
    /// All final checks hold
    pub fn passed(&self) -> bool {
        self.failed_checks().is_empty()
    }

    /// Fraction of final checks that hold
    pub fn check_score(&self) -> f32 {
        let checks = self.checks();
        let held = checks.iter().filter(|(_, ok)| *ok).count();
        held as f32 / checks.len() as f32
    }

    /// Names of the final checks that failed
    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.checks()
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }

    fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("length", self.length_appropriate),
            ("appropriate content", self.no_inappropriate_content),
            ("educational value", self.has_educational_value),
            ("encouraging tone", self.encouraging_tone),
        ]
    }
}

/// Lowercased words joined by single spaces and padded, for whole-word matching
fn normalized(text: &str) -> String {
    format!(" {} ", tokenize(text).join(" "))
}

fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {} ", phrase))
}

/// Run the safety scan and the final checks on an answer
///
/// Terms match whole words only, so "small" does not count as "all".
pub fn validate_answer(answer: &str) -> ValidationReport {
    let text = normalized(answer);
    let words: BTreeSet<String> = tokenize(answer).into_iter().collect();
    let has_word = |term: &&str| words.contains(*term);

    let inappropriate: Vec<&str> = INAPPROPRIATE_TERMS.iter().copied().filter(has_word).collect();
    let absolutes: Vec<&str> = ABSOLUTE_TERMS.iter().copied().filter(has_word).collect();

    let safety_issues: Vec<String> = inappropriate
        .iter()
        .map(|term| format!("potentially inappropriate content: {}", term))
        .chain(
            absolutes
                .iter()
                .map(|term| format!("potentially misleading absolute: {}", term)),
        )
        .collect();

    let safety_score = (1.0 - SAFETY_PENALTY * safety_issues.len() as f32).max(0.0);
    let length = answer.trim().chars().count();

    ValidationReport {
        safety_score,
        safety_issues,
        length_appropriate: (MIN_ANSWER_CHARS..=MAX_ANSWER_CHARS).contains(&length),
        no_inappropriate_content: inappropriate.is_empty(),
        has_educational_value: EDUCATIONAL_TERMS.iter().any(|t| contains_phrase(&text, t)),
        encouraging_tone: ENCOURAGING_PHRASES.iter().any(|p| contains_phrase(&text, p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_ANSWER: &str = "Great question! Let me explain. Plants use sunlight to make \
        sugar in their leaves. For example, a bean plant on a sunny window grows quickly.";

    #[test]
    fn test_good_answer_passes() {
        let report = validate_answer(GOOD_ANSWER);
        assert!(report.passed());
        assert_eq!(report.safety_score, 1.0);
        assert!(report.safety_issues.is_empty());
        assert_eq!(report.check_score(), 1.0);
    }

    #[test]
    fn test_absolutes_lower_safety_score() {
        let report = validate_answer("Plants always need sunlight and never grow in the dark.");
        assert_eq!(report.safety_issues.len(), 2);
        assert!((report.safety_score - 0.6).abs() < 1e-6);
        assert!(report.no_inappropriate_content);
    }

    #[test]
    fn test_safety_score_floors_at_zero() {
        let report = validate_answer(
            "All dangerous illegal violence is always harmful and never certainly impossible",
        );
        assert!(report.safety_issues.len() > 5);
        assert_eq!(report.safety_score, 0.0);
        assert!(!report.no_inappropriate_content);
    }

    #[test]
    fn test_terms_match_whole_words() {
        let report = validate_answer("A small ball fell.");
        assert!(report.safety_issues.is_empty());
    }

    #[test]
    fn test_short_flat_answer_fails_checks() {
        let report = validate_answer("Yes.");
        assert!(!report.passed());
        assert_eq!(
            report.failed_checks(),
            vec!["length", "educational value", "encouraging tone"]
        );
        assert!((report.check_score() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_multiword_phrase_detected() {
        let report = validate_answer("Well done, you solved it!");
        assert!(report.encouraging_tone);
        let report = validate_answer("Keep   up the work");
        assert!(report.encouraging_tone);
    }

    #[test]
    fn test_overlong_answer_fails_length() {
        let report = validate_answer(&"learn ".repeat(400));
        assert!(!report.length_appropriate);
    }
}
