//! Groq integration for the Yeneta tutor
//!
//! This crate provides the Groq implementation of the AnswerService trait.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::GroqClient;
pub use config::{DEFAULT_API_URL, DEFAULT_MODEL, GroqConfig};

// Re-export core types for convenience
pub use yeneta_core::{AnswerService, Error, Result};
