pub mod ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for test endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/api/test/unauthed-ping", get(ping::unauthed_ping))
}

#[derive(OpenApi)]
#[openapi(paths(ping::unauthed_ping), components(schemas(ping::PingResponse)))]
pub struct ApiDoc;
