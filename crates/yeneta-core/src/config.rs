//! Retrieval and prompt configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

/// What to do when the query embedding or similarity search is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetrievalFallback {
    /// Surface the failure to the caller
    Abort,
    /// Rank keyword matches by lexical score alone
    LexicalOnly,
    /// Continue with an empty ranked result
    NoContext,
}

impl FromStr for RetrievalFallback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(RetrievalFallback::Abort),
            "lexical-only" | "lexical" => Ok(RetrievalFallback::LexicalOnly),
            "no-context" | "none" => Ok(RetrievalFallback::NoContext),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown retrieval fallback '{}'",
                other
            ))),
        }
    }
}

/// Configuration for ranking, prompt composition and external call timeouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// Passages kept after ranking
    pub top_k: usize,
    /// Weight of the semantic score; the lexical score gets `1 - semantic_weight`
    pub semantic_weight: f32,
    /// Candidates requested from the content store before ranking
    pub fan_out: usize,
    /// Character budget for the composed prompt
    pub max_prompt_chars: usize,
    pub fallback: RetrievalFallback,
    /// Restrict candidates to passages in the query language
    pub match_language: bool,
    pub answer_timeout: Duration,
    pub retrieval_timeout: Duration,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            semantic_weight: 0.7,
            fan_out: 20,
            max_prompt_chars: 6000,
            fallback: RetrievalFallback::LexicalOnly,
            match_language: false,
            answer_timeout: Duration::from_secs(30),
            retrieval_timeout: Duration::from_secs(10),
        }
    }
}

impl RagConfig {
    /// Create configuration from environment variables, starting from defaults
    pub fn from_env() -> Result<Self> {
        let config = Self::parse_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read environment variables without range checks, so callers can
    /// apply their own overrides before calling [`RagConfig::validate`]
    pub fn parse_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::parse_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::parse_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse values from a key lookup; unparseable values are still errors
    pub fn parse_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "YENETA_TOP_K")? {
            config.top_k = v;
        }
        if let Some(v) = parse_var(&lookup, "YENETA_SEMANTIC_WEIGHT")? {
            config.semantic_weight = v;
        }
        if let Some(v) = parse_var(&lookup, "YENETA_FAN_OUT")? {
            config.fan_out = v;
        }
        if let Some(v) = parse_var(&lookup, "YENETA_MAX_PROMPT_CHARS")? {
            config.max_prompt_chars = v;
        }
        if let Some(v) = lookup("YENETA_RETRIEVAL_FALLBACK") {
            config.fallback = v.parse()?;
        }
        if let Some(v) = parse_var(&lookup, "YENETA_MATCH_LANGUAGE")? {
            config.match_language = v;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "YENETA_ANSWER_TIMEOUT_SECS")? {
            config.answer_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "YENETA_RETRIEVAL_TIMEOUT_SECS")? {
            config.retrieval_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Reject values the ranker or composer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfiguration(
                "top_k must be at least 1".to_string(),
            ));
        }
        validate_weight(self.semantic_weight)?;
        if self.fan_out == 0 {
            return Err(Error::InvalidConfiguration(
                "fan_out must be at least 1".to_string(),
            ));
        }
        if self.max_prompt_chars == 0 {
            return Err(Error::InvalidConfiguration(
                "max_prompt_chars must be positive".to_string(),
            ));
        }
        if self.answer_timeout.is_zero() || self.retrieval_timeout.is_zero() {
            return Err(Error::InvalidConfiguration(
                "timeouts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check that a semantic weight lies in `[0, 1]`
pub fn validate_weight(weight: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(Error::InvalidConfiguration(format!(
            "semantic weight must be between 0 and 1, got {}",
            weight
        )));
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            Error::InvalidConfiguration(format!("{} has an invalid value '{}'", key, raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RagConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_k, 5);
        assert_eq!(config.fan_out, 20);
        assert_eq!(config.fallback, RetrievalFallback::LexicalOnly);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RagConfig::from_lookup(lookup_from(&[
            ("YENETA_TOP_K", "3"),
            ("YENETA_SEMANTIC_WEIGHT", "0.5"),
            ("YENETA_RETRIEVAL_FALLBACK", "abort"),
            ("YENETA_MATCH_LANGUAGE", "true"),
            ("YENETA_ANSWER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.top_k, 3);
        assert_eq!(config.semantic_weight, 0.5);
        assert_eq!(config.fallback, RetrievalFallback::Abort);
        assert!(config.match_language);
        assert_eq!(config.answer_timeout, Duration::from_secs(5));
        assert_eq!(config.fan_out, 20);
    }

    #[test]
    fn test_unparseable_value_is_not_defaulted() {
        let err = RagConfig::from_lookup(lookup_from(&[("YENETA_TOP_K", "five")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ref m) if m.contains("YENETA_TOP_K")));
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let err = RagConfig::from_lookup(lookup_from(&[("YENETA_TOP_K", "0")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_parse_lookup_defers_range_checks() {
        let mut config = RagConfig::parse_lookup(lookup_from(&[("YENETA_TOP_K", "0")])).unwrap();
        assert_eq!(config.top_k, 0);
        assert!(config.validate().is_err());

        config.top_k = 3;
        assert!(config.validate().is_ok());

        let err = RagConfig::parse_lookup(lookup_from(&[("YENETA_TOP_K", "five")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        let config = RagConfig {
            semantic_weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
        assert!(validate_weight(f32::NAN).is_err());
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(1.0).is_ok());
    }

    #[test]
    fn test_fallback_parsing() {
        assert_eq!("lexical".parse::<RetrievalFallback>().unwrap(), RetrievalFallback::LexicalOnly);
        assert_eq!(
            "No-Context".parse::<RetrievalFallback>().unwrap(),
            RetrievalFallback::NoContext
        );
        assert!("retry".parse::<RetrievalFallback>().is_err());
    }
}
