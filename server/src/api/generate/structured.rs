use crate::AppState;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chefai_core::prompts::{render_recipe_prompt, PreferenceValue, RecipePreferences};
use serde::Deserialize;
use utoipa::ToSchema;

/// Structured generation request. Preference fields accept either a
/// single string or a list of strings, and everything is optional; the
/// prompt builder substitutes placeholder tokens for absent fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub ingredients: Option<PreferenceValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub dietary_restrictions: Option<PreferenceValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub cuisine_preference: Option<PreferenceValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub meal_type: Option<PreferenceValue>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Sent by older clients. Identity comes from the Authorization
    /// header on save, never from the generation body.
    #[allow(dead_code)]
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<GenerateRecipeRequest> for RecipePreferences {
    fn from(request: GenerateRecipeRequest) -> Self {
        Self {
            ingredients: request.ingredients,
            dietary_restrictions: request.dietary_restrictions,
            cuisine_preference: request.cuisine_preference,
            meal_type: request.meal_type,
            serving_size: request.serving_size,
            cooking_time: request.cooking_time,
            difficulty: request.difficulty,
        }
    }
}

/// Generate a recipe from structured preferences
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe, or a parse-failure envelope", body = super::GenerateResponse),
        (status = 400, description = "Malformed JSON body", body = crate::api::ErrorResponse),
        (status = 500, description = "Configuration or provider error", body = crate::api::ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> Response {
    let preferences = RecipePreferences::from(request);
    let prompt = render_recipe_prompt(&preferences);
    super::run_generation(&state, prompt).await
}
