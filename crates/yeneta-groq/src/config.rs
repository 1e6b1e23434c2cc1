//! Groq configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use yeneta_core::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for the Groq chat completions client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl GroqConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::InvalidConfiguration(
                    "GROQ_API_KEY environment variable not found".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Some(api_url) = lookup("GROQ_API_URL") {
            config.api_url = api_url;
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            config.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create configuration with explicit key and default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 2048,
            timeout_secs: 30,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url).map_err(|e| {
            Error::InvalidConfiguration(format!("invalid GROQ_API_URL '{}': {}", self.api_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfiguration(format!(
                "GROQ_API_URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "GROQ_MODEL must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfiguration(
                "request timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
