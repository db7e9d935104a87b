use crate::api::ErrorResponse;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chefai_core::prompts::render_free_text_prompt;
use serde::Deserialize;
use utoipa::ToSchema;

/// Free-text generation request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromPromptRequest {
    /// What the user wants to cook, in their own words.
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Generate a recipe from a free-text description
#[utoipa::path(
    post,
    path = "/api/generate/prompt",
    tag = "generate",
    request_body = GenerateFromPromptRequest,
    responses(
        (status = 200, description = "Generated recipe, or a parse-failure envelope", body = super::GenerateResponse),
        (status = 400, description = "Missing or empty userPrompt", body = crate::api::ErrorResponse),
        (status = 500, description = "Configuration or provider error", body = crate::api::ErrorResponse)
    )
)]
pub async fn generate_from_prompt(
    State(state): State<AppState>,
    Json(request): Json<GenerateFromPromptRequest>,
) -> Response {
    let user_prompt = request.user_prompt.as_deref().map(str::trim).unwrap_or("");

    if user_prompt.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing or empty userPrompt field.".to_string(),
            }),
        )
            .into_response();
    }

    let prompt = render_free_text_prompt(user_prompt);
    super::run_generation(&state, prompt).await
}
