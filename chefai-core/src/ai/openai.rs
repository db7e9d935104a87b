//! OpenAI provider for chat completions and image generation.

use super::{AiConfig, AiError, AiProvider, ChatMessage, ChatRequest, ConfigError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenAI API provider.
#[derive(Debug)]
pub struct OpenAiProvider {
    config: AiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from environment configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(AiConfig::from_env()?))
    }

    /// Translate a non-success response into `AiError::ApiError`, pulling
    /// the message out of the standard OpenAI error envelope when present.
    fn api_error(status: u16, body: String) -> AiError {
        if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return AiError::ApiError {
                status,
                message: error_response.error.message,
            };
        }
        AiError::ApiError {
            status,
            message: body,
        }
    }
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Image generation request format.
#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
}

/// Image generation response format.
#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Error response envelope.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, AiError> {
        let body = ChatCompletionRequest {
            model: &self.config.chat_model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.json_response.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        tracing::debug!(model = %self.config.chat_model, "requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(Self::api_error(status, body));
        }

        let response: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| AiError::ParseError(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty());

        match content {
            Some(text) => Ok(text),
            None => Err(AiError::NoContent(format!(
                "model {} returned a completion without text content",
                self.config.chat_model
            ))),
        }
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<String>, AiError> {
        let body = ImageGenerationRequest {
            model: &self.config.image_model,
            prompt,
            n: 1,
            size: "1024x1024",
        };

        tracing::debug!(model = %self.config.image_model, "requesting image generation");

        let response = self
            .client
            .post(format!("{}/images/generations", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(Self::api_error(status, body));
        }

        let response: ImageGenerationResponse =
            serde_json::from_str(&body).map_err(|e| AiError::ParseError(e.to_string()))?;

        Ok(response.data.into_iter().filter_map(|d| d.url).collect())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.chat_model
    }
}
