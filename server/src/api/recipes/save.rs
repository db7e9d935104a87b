use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeRequest {
    /// The recipe to keep, exactly as produced by generation.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub recipe_data: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeResponse {
    pub message: String,
    pub saved_recipe_id: String,
}

/// Save a generated recipe to the authenticated user's history
#[utoipa::path(
    post,
    path = "/api/save",
    tag = "recipes",
    request_body = SaveRecipeRequest,
    responses(
        (status = 201, description = "Recipe saved", body = SaveRecipeResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<SaveRecipeRequest>,
) -> impl IntoResponse {
    let recipe = match request.recipe_data {
        Some(value) if value.is_object() => value,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid or missing recipe data.".to_string(),
                }),
            )
                .into_response()
        }
    };

    let image_url = match request.image_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid or missing image URL.".to_string(),
                }),
            )
                .into_response()
        }
    };

    let Some(store) = state.store.as_deref() else {
        tracing::error!("MONGO_URI is not configured; cannot save recipes");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Server configuration error: document store not configured.".to_string(),
            }),
        )
            .into_response();
    };

    match store.insert(&user.id, recipe, image_url).await {
        Ok(saved_recipe_id) => (
            StatusCode::CREATED,
            Json(SaveRecipeResponse {
                message: "Recipe saved successfully!".to_string(),
                saved_recipe_id,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to save recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to save recipe.".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db::testing::MemoryStore;
    use crate::db::RecipeStore;
    use crate::test_util::{post_json, state_with_auth_and_store, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn save_body() -> serde_json::Value {
        json!({
            "recipeData": {"title": "Chicken Rice Bowl", "ingredients": ["chicken"]},
            "imageUrl": "https://img.example/bowl.png"
        })
    }

    #[tokio::test]
    async fn test_save_without_token_is_unauthorized_and_touches_no_store() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(&[], store.clone()));

        let response = post_json(app, "/api/save", None, save_body()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_with_rejected_token_is_unauthorized_and_touches_no_store() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(&[], store.clone()));

        let response = post_json(app, "/api/save", Some("bogus-token"), save_body()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_missing_recipe_data() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(
            &[("token-a", "user-a")],
            store.clone(),
        ));

        let response = post_json(
            app,
            "/api/save",
            Some("token-a"),
            json!({"imageUrl": "https://img.example/x.png"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = crate::test_util::body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("recipe data"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_non_object_recipe_data() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(
            &[("token-a", "user-a")],
            store.clone(),
        ));

        let response = post_json(
            app,
            "/api/save",
            Some("token-a"),
            json!({"recipeData": "just a string", "imageUrl": "https://img.example/x.png"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_missing_image_url() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(
            &[("token-a", "user-a")],
            store.clone(),
        ));

        let response = post_json(
            app,
            "/api/save",
            Some("token-a"),
            json!({"recipeData": {"title": "x"}}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = crate::test_util::body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("image URL"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_inserts_record_for_authenticated_user() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(state_with_auth_and_store(
            &[("token-a", "user-a")],
            store.clone(),
        ));

        let response = post_json(app, "/api/save", Some("token-a"), save_body()).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = crate::test_util::body_json(response).await;
        assert_eq!(body["message"], "Recipe saved successfully!");
        assert!(!body["savedRecipeId"].as_str().unwrap().is_empty());

        let records = store.list_for_user("user-a").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].recipe["title"], "Chicken Rice Bowl");
        assert_eq!(records[0].image_url, "https://img.example/bowl.png");
    }

    #[tokio::test]
    async fn test_save_surfaces_store_failures_as_500() {
        let store = Arc::new(MemoryStore::failing());
        let app = test_app(state_with_auth_and_store(
            &[("token-a", "user-a")],
            store.clone(),
        ));

        let response = post_json(app, "/api/save", Some("token-a"), save_body()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
