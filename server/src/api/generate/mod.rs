pub mod prompt;
pub mod structured;

use crate::api::ErrorResponse;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chefai_core::ai::{AiError, AiProvider, ChatMessage, ChatRequest};
use chefai_core::prompts::{render_image_prompt, SYSTEM_PROMPT};
use chefai_core::recipe::{parse_recipe, Recipe};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Sampling temperature for recipe completions: creative, but low enough
/// that the model keeps to the requested JSON shape.
const TEMPERATURE: f32 = 0.7;

/// Parse-failure envelopes quote at most this many characters of raw
/// model output.
const RAW_TEXT_LIMIT: usize = 200;

/// Returns the router for generation endpoints (mounted at /api/generate)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(structured::generate_recipe))
        .route("/prompt", post(prompt::generate_from_prompt))
}

/// Successful generation result. `imageUrl` is omitted when no image
/// could be produced; image failures never fail the request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[schema(value_type = Object)]
    pub recipe: Recipe,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Returned with HTTP 200 when the model answered but the reply was not
/// a usable recipe. Callers must branch on the payload shape, not the
/// status code, to detect this case.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFailure {
    pub message: String,
    /// Raw model output, truncated.
    pub raw_text: String,
    pub error_details: String,
}

/// Run the generation sequence for an already-rendered user prompt:
/// completion, schema check, then best-effort image.
async fn run_generation(state: &AppState, user_prompt: String) -> Response {
    let Some(ai) = state.ai.as_deref() else {
        tracing::error!("OPENAI_API_KEY is not configured; cannot generate recipes");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Server configuration error: OpenAI API key not set.".to_string(),
            }),
        )
            .into_response();
    };

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ],
        max_tokens: None,
        temperature: Some(TEMPERATURE),
        json_response: true,
    };

    let raw_text = match ai.complete(request).await {
        Ok(text) => text,
        Err(AiError::NoContent(detail)) => {
            tracing::error!(detail = %detail, "model returned no recipe content");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "The model did not return any recipe content. This might indicate \
                            an issue with the model response structure."
                        .to_string(),
                }),
            )
                .into_response();
        }
        Err(AiError::ApiError { status, message }) => {
            tracing::error!(status = status, message = %message, "provider rejected the completion request");
            return (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Json(ErrorResponse {
                    error: format!(
                        "OpenAI API error: {message}. Check your API key, usage limits, or prompt."
                    ),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("recipe completion failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error during recipe generation.".to_string(),
                }),
            )
                .into_response();
        }
    };

    let recipe = match parse_recipe(&raw_text) {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!(error = %e, "model output failed the recipe schema check");
            let truncated = truncate_chars(&raw_text, RAW_TEXT_LIMIT);
            // Deliberately 200: "the model misbehaved" is a different
            // outcome than "the endpoint errored", and clients display it.
            return (
                StatusCode::OK,
                Json(GenerateFailure {
                    message: format!(
                        "The model did not return valid JSON. Please try again or refine your \
                         prompt. Raw text (first {RAW_TEXT_LIMIT} chars): {truncated}..."
                    ),
                    raw_text: truncated,
                    error_details: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let image_url = generate_recipe_image(ai, &recipe).await;

    (
        StatusCode::OK,
        Json(GenerateResponse { recipe, image_url }),
    )
        .into_response()
}

/// Best-effort image generation: every failure path yields `None`. The
/// option in the signature is the contract; callers never see an error.
async fn generate_recipe_image(ai: &dyn AiProvider, recipe: &Recipe) -> Option<String> {
    let prompt = render_image_prompt(&recipe.title, &recipe.ingredients, &recipe.instructions);

    match ai.generate_image(&prompt).await {
        Ok(urls) => {
            let url = urls.into_iter().next();
            if url.is_none() {
                tracing::warn!("image generation returned no data, skipping image");
            }
            url
        }
        Err(e) => {
            tracing::warn!("image generation failed, skipping image: {}", e);
            None
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[derive(OpenApi)]
#[openapi(
    paths(structured::generate_recipe, prompt::generate_from_prompt),
    components(schemas(
        GenerateResponse,
        GenerateFailure,
        structured::GenerateRecipeRequest,
        prompt::GenerateFromPromptRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use crate::test_util::{post_json, state_with_ai, test_app};
    use axum::http::StatusCode;
    use chefai_core::ai::{FakeImages, FakeProvider};
    use serde_json::json;

    const RECIPE_JSON: &str = r#"{"title":"Chicken Rice Bowl","ingredients":["chicken","rice"],"instructions":["cook chicken","cook rice","combine"]}"#;

    #[tokio::test]
    async fn test_generate_end_to_end_with_stubbed_providers() {
        let ai = FakeProvider::with_response("Ingredients: chicken, rice", RECIPE_JSON)
            .with_image_url("https://img.example/bowl.png");
        let app = test_app(state_with_ai(ai));

        let response = post_json(
            app,
            "/api/generate",
            None,
            json!({"ingredients": "chicken, rice"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert_eq!(body["recipe"]["title"], "Chicken Rice Bowl");
        assert_eq!(body["imageUrl"], "https://img.example/bowl.png");
    }

    #[tokio::test]
    async fn test_parse_failure_returns_200_envelope() {
        let raw = "Sure thing! Here's a lovely recipe for you: ".repeat(10);
        let ai = FakeProvider::new().with_default_response(&raw);
        let app = test_app(state_with_ai(ai));

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert!(body.get("recipe").is_none());
        let raw_text = body["rawText"].as_str().unwrap();
        assert!(raw_text.chars().count() <= 200);
        assert!(raw.starts_with(raw_text));
        assert!(!body["errorDetails"].as_str().unwrap().is_empty());
        assert!(body["message"].as_str().unwrap().contains("did not return valid JSON"));
    }

    #[tokio::test]
    async fn test_shape_check_failure_also_returns_200_envelope() {
        // Valid JSON, but instructions is not an array.
        let ai = FakeProvider::new()
            .with_default_response(r#"{"title":"x","ingredients":[],"instructions":"mix"}"#);
        let app = test_app(state_with_ai(ai));

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert!(body["errorDetails"]
            .as_str()
            .unwrap()
            .contains("instructions[]"));
    }

    #[tokio::test]
    async fn test_image_failure_never_fails_the_request() {
        let ai = FakeProvider::new()
            .with_default_response(RECIPE_JSON)
            .with_images(FakeImages::Fail);
        let app = test_app(state_with_ai(ai));

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert_eq!(body["recipe"]["title"], "Chicken Rice Bowl");
        assert!(body.get("imageUrl").is_none());
    }

    #[tokio::test]
    async fn test_empty_image_result_set_is_treated_as_absent() {
        let ai = FakeProvider::new()
            .with_default_response(RECIPE_JSON)
            .with_images(FakeImages::Empty);
        let app = test_app(state_with_ai(ai));

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert!(body.get("imageUrl").is_none());
    }

    #[tokio::test]
    async fn test_missing_credential_is_a_configuration_error() {
        let app = test_app(crate::test_util::empty_state());

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = crate::test_util::body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("configuration error"));
    }

    #[tokio::test]
    async fn test_provider_error_status_is_propagated() {
        #[derive(Debug)]
        struct QuotaExceeded;

        #[async_trait::async_trait]
        impl chefai_core::ai::AiProvider for QuotaExceeded {
            async fn complete(
                &self,
                _request: chefai_core::ai::ChatRequest,
            ) -> Result<String, chefai_core::ai::AiError> {
                Err(chefai_core::ai::AiError::ApiError {
                    status: 429,
                    message: "quota exceeded".to_string(),
                })
            }

            async fn generate_image(
                &self,
                _prompt: &str,
            ) -> Result<Vec<String>, chefai_core::ai::AiError> {
                Ok(Vec::new())
            }

            fn provider_name(&self) -> &'static str {
                "quota"
            }

            fn model_name(&self) -> &str {
                "quota"
            }
        }

        let app = test_app(state_with_ai(QuotaExceeded));

        let response = post_json(app, "/api/generate", None, json!({})).await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = crate::test_util::body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_free_text_endpoint_generates() {
        let ai = FakeProvider::with_response("user's request", RECIPE_JSON);
        let app = test_app(state_with_ai(ai));

        let response = post_json(
            app,
            "/api/generate/prompt",
            None,
            json!({"userPrompt": "something with chicken and rice"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = crate::test_util::body_json(response).await;
        assert_eq!(body["recipe"]["title"], "Chicken Rice Bowl");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_rejected() {
        let app = test_app(state_with_ai(FakeProvider::default()));

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let text = "é".repeat(300);
        let truncated = super::truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[tokio::test]
    async fn test_free_text_endpoint_rejects_empty_prompt() {
        let app = test_app(state_with_ai(FakeProvider::default()));

        let response = post_json(app, "/api/generate/prompt", None, json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let app = test_app(state_with_ai(FakeProvider::default()));
        let response =
            post_json(app, "/api/generate/prompt", None, json!({"userPrompt": "  "})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
