use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::SavedRecipe;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub recipes: Vec<SavedRecipe>,
}

/// List the authenticated user's saved recipes, newest first
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "recipes",
    responses(
        (status = 200, description = "The user's saved recipes", body = HistoryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn history(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let Some(store) = state.store.as_deref() else {
        tracing::error!("MONGO_URI is not configured; cannot fetch saved recipes");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Server configuration error: document store not configured.".to_string(),
            }),
        )
            .into_response();
    };

    match store.list_for_user(&user.id).await {
        Ok(recipes) => (StatusCode::OK, Json(HistoryResponse { recipes })).into_response(),
        Err(e) => {
            tracing::error!("failed to fetch saved recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch saved recipes.".to_string(),
                }),
            )
                .into_response()
        }
    }
}
