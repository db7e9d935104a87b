pub mod history;
pub mod save;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for saved-recipe endpoints (mounted at /api)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/save", post(save::save_recipe))
        .route("/api/history", get(history::history))
}

#[derive(OpenApi)]
#[openapi(
    paths(save::save_recipe, history::history),
    components(schemas(
        save::SaveRecipeRequest,
        save::SaveRecipeResponse,
        history::HistoryResponse,
        crate::db::SavedRecipe,
    ))
)]
pub struct ApiDoc;
