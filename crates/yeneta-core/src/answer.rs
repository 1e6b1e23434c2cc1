//! Answer service trait

use async_trait::async_trait;

use crate::Result;

/// Hosted language model used to answer a composed prompt
///
/// A failed or timed out call is reported as
/// [`crate::Error::AnswerServiceFailure`]; implementations never retry.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
