//! Fake AI provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{AiError, AiProvider, ChatRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Image behavior for the fake provider.
#[derive(Debug, Clone)]
pub enum FakeImages {
    /// Return these URLs.
    Urls(Vec<String>),
    /// Return an empty result set (a valid provider answer).
    Empty,
    /// Fail the image call.
    Fail,
}

/// A fake AI provider for testing.
///
/// Completion responses are matched by checking if the prompt contains a
/// registered substring. If no match is found, returns a default response
/// or an error. Image behavior is configured up front.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    images: FakeImages,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            images: FakeImages::Empty,
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            images: FakeImages::Empty,
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Set the image behavior.
    pub fn with_images(mut self, images: FakeImages) -> Self {
        self.images = images;
        self
    }

    /// Shorthand: return a single image URL.
    pub fn with_image_url(self, url: &str) -> Self {
        self.with_images(FakeImages::Urls(vec![url.to_string()]))
    }
}

#[async_trait]
impl AiProvider for FakeProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(AiError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
        match &self.images {
            FakeImages::Urls(urls) => Ok(urls.clone()),
            FakeImages::Empty => Ok(Vec::new()),
            FakeImages::Fail => Err(AiError::ApiError {
                status: 500,
                message: "FakeProvider: image generation configured to fail".to_string(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
