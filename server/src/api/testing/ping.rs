use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

/// Unauthenticated liveness probe
#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses(
        (status = 200, description = "Unauthed ping response", body = PingResponse)
    )
)]
pub async fn unauthed_ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "unauthed-ping".to_string(),
    })
}
