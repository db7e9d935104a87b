//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenAI base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model for recipe generation.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default image model for recipe photos.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the OpenAI-compatible endpoint.
    pub api_key: String,
    /// Chat model name (e.g., "gpt-3.5-turbo").
    pub chat_model: String,
    /// Image model name (e.g., "dall-e-3").
    pub image_model: String,
    /// Base URL for the API.
    pub base_url: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key for the model endpoint
    ///
    /// Optional:
    /// - `CHEFAI_CHAT_MODEL`: Chat model name (default: "gpt-3.5-turbo")
    /// - `CHEFAI_IMAGE_MODEL`: Image model name (default: "dall-e-3")
    /// - `CHEFAI_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let chat_model =
            env::var("CHEFAI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let image_model =
            env::var("CHEFAI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let base_url =
            env::var("CHEFAI_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            chat_model,
            image_model,
            base_url,
        })
    }
}
