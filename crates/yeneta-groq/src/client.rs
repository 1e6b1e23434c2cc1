//! Groq chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use yeneta_core::{AnswerService, Error, Result};

use crate::config::GroqConfig;

/// Answer service backed by Groq's OpenAI-compatible chat completions API
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub(crate) role: String,
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub(crate) model: String,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl GroqClient {
    pub const LLAMA_3_1_8B_INSTANT: &'static str = "llama-3.1-8b-instant";
    pub const LLAMA_3_3_70B_VERSATILE: &'static str = "llama-3.3-70b-versatile";

    /// Create a new Groq client from configuration
    pub fn new(config: GroqConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::AnswerServiceFailure(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Groq client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GroqConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'))
    }

    pub(crate) fn request_body(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

/// First non-empty choice of a completion response
pub(crate) fn extract_answer(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            Error::AnswerServiceFailure("Groq returned an empty completion".to_string())
        })
}

#[async_trait]
impl AnswerService for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();
        tracing::debug!(model = %self.config.model, url = %url, "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::AnswerServiceFailure(format!(
                        "Groq request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    Error::AnswerServiceFailure(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::AnswerServiceFailure(format!(
                "Groq API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::AnswerServiceFailure(format!("invalid Groq response: {}", e)))?;

        extract_answer(body)
    }
}
