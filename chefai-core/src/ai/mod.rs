//! AI provider abstraction for recipe and image generation.
//!
//! This module provides a trait-based abstraction over the remote model
//! API so the request handlers can be tested against a fake provider.

mod config;
mod fake;
mod openai;
mod types;

pub use config::{AiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
pub use fake::{FakeImages, FakeProvider};
pub use openai::OpenAiProvider;
pub use types::{ChatMessage, ChatRequest, Role};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The call itself succeeded but the reply carried no usable text.
    /// Kept separate from `ParseError` so callers can report "the model
    /// answered nothing" differently from "the answer was not JSON".
    #[error("no content in response: {0}")]
    NoContent(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for AI providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making the API calls and returning the model's raw
/// output; interpreting that output is the caller's job.
#[async_trait]
pub trait AiProvider: Send + Sync + fmt::Debug {
    /// Send a chat request to the model and get its text response.
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError>;

    /// Request one or more images for the given prompt; returns their URLs.
    ///
    /// An empty vector is a valid provider answer and is not an error.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<String>, AiError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the chat model name (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}
