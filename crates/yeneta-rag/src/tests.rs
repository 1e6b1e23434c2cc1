//! Snapshot tests for composed prompts

#[cfg(test)]
mod snapshot_tests {
    use crate::compose;
    use insta::assert_snapshot;
    use yeneta_core::{Difficulty, Language, Passage, Query, RankedResult, ScoredPassage};

    #[test]
    fn test_grounded_prompt_snapshot() {
        let query = Query::new(
            "What is photosynthesis?",
            Language::English,
            Difficulty::Intermediate,
        )
        .unwrap();
        let ranked = RankedResult {
            entries: vec![ScoredPassage {
                passage: Passage {
                    id: "bio#0".to_string(),
                    text: "Plants make food from sunlight.".to_string(),
                    subject: "biology".to_string(),
                    language: Language::English,
                    difficulty: Difficulty::Intermediate,
                    embedding: vec![],
                },
                score: 0.9,
            }],
        };

        let prompt = compose(
            &query,
            &ranked,
            Language::English,
            Difficulty::Intermediate,
            2000,
        )
        .unwrap();

        assert_snapshot!(prompt.text, @r"
        You are Yeneta, an AI study assistant helping a student.
        Respond in English (English).
        Learning level: Intermediate (complexity 2/3). Keep sentences under 25 words.
        Include a short worked example.
        Base your answer on the supporting material below and cite it using the [source: id] tags.

        Supporting material:
        [source: bio#0]
        Plants make food from sunlight.

        Question: What is photosynthesis?
        ");
    }

    #[test]
    fn test_ungrounded_prompt_snapshot() {
        let query = Query::new("Mvua inatoka wapi?", Language::Swahili, Difficulty::Advanced)
            .unwrap();

        let prompt = compose(
            &query,
            &RankedResult::empty(),
            Language::Swahili,
            Difficulty::Advanced,
            2000,
        )
        .unwrap();

        assert_snapshot!(prompt.text, @r"
        You are Yeneta, an AI study assistant helping a student.
        Respond in Swahili (Kiswahili).
        Learning level: Advanced (complexity 3/3). Keep sentences under 40 words.
        NO SUPPORTING MATERIAL FOUND. Answer from general knowledge and tell the student this answer is lower-confidence because no course material supported it.

        Question: Mvua inatoka wapi?
        ");
    }
}
