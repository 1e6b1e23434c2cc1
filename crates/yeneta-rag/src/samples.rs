//! Built-in sample course material for the demo

use yeneta_core::{Difficulty, Language, SourceDocument};

/// Sample documents covering a few school subjects
pub fn sample_documents() -> Vec<SourceDocument> {
    let samples = vec![
        (
            "math-fractions",
            "mathematics",
            Difficulty::Beginner,
            Language::English,
            "A fraction describes a part of a whole. The number on top is the numerator and tells how many parts we have. The number on the bottom is the denominator and tells how many equal parts the whole is divided into. For example, 3/4 of a pizza means the pizza was cut into 4 equal slices and we have 3 of them.",
        ),
        (
            "math-linear-equations",
            "mathematics",
            Difficulty::Intermediate,
            Language::English,
            "A linear equation such as 2x + 3 = 11 is solved by isolating the variable. Subtract 3 from both sides to get 2x = 8, then divide both sides by 2 to get x = 4. Whatever operation is applied to one side of the equation must be applied to the other side to keep it balanced.",
        ),
        (
            "bio-photosynthesis",
            "biology",
            Difficulty::Beginner,
            Language::English,
            "Photosynthesis is the process plants use to make their own food. Leaves capture sunlight with a green pigment called chlorophyll. Using that light energy, plants combine carbon dioxide from the air and water from the soil to make glucose, a sugar, and release oxygen into the air.",
        ),
        (
            "bio-cell-division",
            "biology",
            Difficulty::Advanced,
            Language::English,
            "Mitosis divides one eukaryotic cell into two genetically identical daughter cells. It proceeds through prophase, metaphase, anaphase and telophase, after which cytokinesis splits the cytoplasm. Meiosis instead produces four haploid gametes and introduces variation through crossing over and independent assortment.",
        ),
        (
            "phy-newton-laws",
            "physics",
            Difficulty::Intermediate,
            Language::English,
            "Newton's first law states that an object stays at rest or moves at constant velocity unless a net force acts on it. The second law relates force, mass and acceleration: F = ma. The third law says that every action force has an equal and opposite reaction force.",
        ),
        (
            "hist-adwa",
            "history",
            Difficulty::Intermediate,
            Language::English,
            "The Battle of Adwa was fought on 1 March 1896 between the Ethiopian Empire under Emperor Menelik II and the Kingdom of Italy. The Ethiopian victory secured Ethiopia's independence and became a symbol of African resistance to colonialism.",
        ),
        (
            "geo-water-cycle",
            "geography",
            Difficulty::Beginner,
            Language::Swahili,
            "Mzunguko wa maji ni jinsi maji yanavyosafiri duniani. Jua hupasha maji ya bahari na maziwa, maji huwa mvuke na kupanda angani. Mvuke hupoa na kuunda mawingu, kisha maji hurudi ardhini kama mvua.",
        ),
    ];

    samples
        .into_iter()
        .map(|(id, subject, difficulty, language, text)| SourceDocument {
            id: id.to_string(),
            text: text.to_string(),
            subject: subject.to_string(),
            language,
            difficulty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let docs = sample_documents();
        let ids: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn test_samples_fit_in_one_default_chunk() {
        let config = yeneta_core::ChunkingConfig::default();
        assert!(sample_documents()
            .iter()
            .all(|d| d.text.chars().count() <= config.chunk_size));
    }
}
