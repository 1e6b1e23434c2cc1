//! Snapshot tests for core types

#[cfg(test)]
mod snapshot_tests {
    use crate::{Difficulty, Language, RetrievalFallback};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_language_codes_snapshot() {
        assert_yaml_snapshot!(Language::all(), @r"
        - en
        - am
        - om
        - ti
        - yo
        - sw
        ");
    }

    #[test]
    fn test_beginner_profile_snapshot() {
        assert_yaml_snapshot!(Difficulty::Beginner.profile(), @r"
        complexity: 1
        max_sentence_words: 15
        use_examples: true
        use_analogies: true
        scaffolding: true
        ");
    }

    #[test]
    fn test_fallback_serialization_snapshot() {
        let fallbacks = vec![
            RetrievalFallback::Abort,
            RetrievalFallback::LexicalOnly,
            RetrievalFallback::NoContext,
        ];
        assert_yaml_snapshot!(fallbacks, @r"
        - abort
        - lexical-only
        - no-context
        ");
    }
}
