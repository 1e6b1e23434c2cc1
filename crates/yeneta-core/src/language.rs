//! Supported response languages, learning levels and language detection

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, Result};

/// Languages the tutor can answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "am")]
    Amharic,
    #[serde(rename = "om")]
    Oromo,
    #[serde(rename = "ti")]
    Tigrigna,
    #[serde(rename = "yo")]
    Yoruba,
    #[serde(rename = "sw")]
    Swahili,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Amharic => "am",
            Language::Oromo => "om",
            Language::Tigrigna => "ti",
            Language::Yoruba => "yo",
            Language::Swahili => "sw",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Amharic => "Amharic",
            Language::Oromo => "Afaan Oromo",
            Language::Tigrigna => "Tigrigna",
            Language::Yoruba => "Yoruba",
            Language::Swahili => "Swahili",
        }
    }

    /// Name of the language in the language itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Amharic => "አማርኛ",
            Language::Oromo => "Afaan Oromoo",
            Language::Tigrigna => "ትግርኛ",
            Language::Yoruba => "Èdè Yorùbá",
            Language::Swahili => "Kiswahili",
        }
    }

    /// Get all supported languages
    pub fn all() -> Vec<Language> {
        vec![
            Language::English,
            Language::Amharic,
            Language::Oromo,
            Language::Tigrigna,
            Language::Yoruba,
            Language::Swahili,
        ]
    }

    /// Parse a language code, rejecting anything unsupported
    pub fn from_code(code: &str) -> Result<Language> {
        match code.trim().to_lowercase().as_str() {
            "en" => Ok(Language::English),
            "am" => Ok(Language::Amharic),
            "om" => Ok(Language::Oromo),
            "ti" => Ok(Language::Tigrigna),
            "yo" => Ok(Language::Yoruba),
            "sw" => Ok(Language::Swahili),
            other => Err(Error::InvalidConfiguration(format!(
                "unsupported language code '{}'",
                other
            ))),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Learning level the answer is pitched at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// How a learning level shapes the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyProfile {
    pub complexity: u8,
    pub max_sentence_words: u32,
    pub use_examples: bool,
    pub use_analogies: bool,
    pub scaffolding: bool,
}

impl Difficulty {
    pub fn code(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Beginner => DifficultyProfile {
                complexity: 1,
                max_sentence_words: 15,
                use_examples: true,
                use_analogies: true,
                scaffolding: true,
            },
            Difficulty::Intermediate => DifficultyProfile {
                complexity: 2,
                max_sentence_words: 25,
                use_examples: true,
                use_analogies: false,
                scaffolding: false,
            },
            Difficulty::Advanced => DifficultyProfile {
                complexity: 3,
                max_sentence_words: 40,
                use_examples: false,
                use_analogies: false,
                scaffolding: false,
            },
        }
    }

    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced]
    }

    /// Parse a level name, rejecting anything outside the fixed set
    pub fn from_code(code: &str) -> Result<Difficulty> {
        match code.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(Error::InvalidConfiguration(format!(
                "unsupported difficulty level '{}'",
                other
            ))),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::from_code(s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const TIGRIGNA_KEYWORDS: &[&str] = &["ትግርኛ", "ከመይ", "እንታይ", "ኣበይ", "መዓስ"];
const AMHARIC_KEYWORDS: &[&str] = &["አማርኛ", "እንዴት", "ምንድን", "የት", "መቼ"];
const OROMO_KEYWORDS: &[&str] = &["oromoo", "akkam", "maal", "maaliif", "eessa", "yoom"];
const YORUBA_KEYWORDS: &[&str] = &["yorùbá", "yoruba", "bawo", "báwo", "kini", "kíni", "nigbawo"];
const SWAHILI_KEYWORDS: &[&str] = &["kiswahili", "vipi", "nini", "wapi", "lini", "habari", "je"];

fn is_ethiopic(c: char) -> bool {
    matches!(c, '\u{1200}'..='\u{137F}' | '\u{1380}'..='\u{139F}' | '\u{2D80}'..='\u{2DDF}')
}

fn is_yoruba_letter(c: char) -> bool {
    matches!(c, 'ẹ' | 'ọ' | 'ṣ' | 'Ẹ' | 'Ọ' | 'Ṣ')
}

/// Detect the language of a student question
///
/// Keyword hits win over script heuristics; anything inconclusive is English.
pub fn detect_language(text: &str) -> Language {
    let alphanumeric = text.chars().filter(|c| c.is_alphanumeric()).count();
    if alphanumeric < 3 {
        return Language::English;
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if TIGRIGNA_KEYWORDS.iter().any(|k| text.contains(k)) {
        return Language::Tigrigna;
    }
    if AMHARIC_KEYWORDS.iter().any(|k| text.contains(k)) {
        return Language::Amharic;
    }
    if text.chars().any(is_ethiopic) {
        return Language::Amharic;
    }

    let has_word = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    if has_word(OROMO_KEYWORDS) {
        return Language::Oromo;
    }
    if has_word(YORUBA_KEYWORDS) || text.chars().any(is_yoruba_letter) {
        return Language::Yoruba;
    }
    if has_word(SWAHILI_KEYWORDS) {
        return Language::Swahili;
    }

    Language::English
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_code(language.code()).unwrap(), language);
        }
    }

    #[test]
    fn test_language_from_code_case_insensitive() {
        assert_eq!(Language::from_code("AM").unwrap(), Language::Amharic);
        assert_eq!(" sw ".parse::<Language>().unwrap(), Language::Swahili);
    }

    #[test]
    fn test_unsupported_language_is_configuration_error() {
        let err = Language::from_code("fr").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from_code("Advanced").unwrap(), Difficulty::Advanced);
        assert!(matches!(
            Difficulty::from_code("expert"),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_difficulty_profiles_scale_with_level() {
        let beginner = Difficulty::Beginner.profile();
        let advanced = Difficulty::Advanced.profile();
        assert_eq!(beginner.complexity, 1);
        assert_eq!(advanced.complexity, 3);
        assert!(beginner.max_sentence_words < advanced.max_sentence_words);
        assert!(beginner.scaffolding);
        assert!(!advanced.use_examples);
    }

    #[test]
    fn test_detect_language_defaults_to_english() {
        assert_eq!(detect_language("What is photosynthesis?"), Language::English);
        assert_eq!(detect_language("?!"), Language::English);
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn test_detect_language_keywords() {
        assert_eq!(detect_language("Akkam, maal jechuu dha?"), Language::Oromo);
        assert_eq!(detect_language("Bawo ni photosynthesis se n sise?"), Language::Yoruba);
        assert_eq!(detect_language("Je, photosynthesis ni nini?"), Language::Swahili);
    }

    #[test]
    fn test_detect_language_ethiopic_script() {
        assert_eq!(detect_language("ፎቶሲንተሲስ እንዴት ይሰራል?"), Language::Amharic);
        assert_eq!(detect_language("ፎቶሲንተሲስ ከመይ ይሰርሕ?"), Language::Tigrigna);
        assert_eq!(detect_language("ፎቶሲንተሲስ"), Language::Amharic);
    }

    #[test]
    fn test_detect_language_yoruba_letters() {
        assert_eq!(detect_language("Ṣe alaye ọrọ yii"), Language::Yoruba);
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::Oromo.to_string(), "Afaan Oromo");
        assert_eq!(Difficulty::Intermediate.to_string(), "Intermediate");
    }
}
