//! Shared helpers for handler tests: state construction with fakes, and
//! request/response plumbing that drives the real router.

use crate::auth::FakeAuth;
use crate::db::testing::MemoryStore;
use crate::db::RecipeStore;
use crate::{api, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chefai_core::ai::AiProvider;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// State with nothing configured; every subsystem reports a
/// configuration error when reached.
pub fn empty_state() -> AppState {
    AppState {
        ai: None,
        auth: None,
        store: None,
    }
}

/// State with only an AI provider, for generation tests.
pub fn state_with_ai(ai: impl AiProvider + 'static) -> AppState {
    AppState {
        ai: Some(Arc::new(ai)),
        auth: None,
        store: None,
    }
}

/// State with a fake auth provider accepting the given (token, user id)
/// pairs and the given store, for save/history tests.
pub fn state_with_auth_and_store(tokens: &[(&str, &str)], store: Arc<MemoryStore>) -> AppState {
    let mut auth = FakeAuth::rejecting();
    for (token, user_id) in tokens {
        auth.add_token(token, user_id);
    }

    AppState {
        ai: None,
        auth: Some(Arc::new(auth)),
        store: Some(store as Arc<dyn RecipeStore>),
    }
}

/// The full application router over the given state.
pub fn test_app(state: AppState) -> Router {
    api::router().with_state(state)
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

/// GET with a verbatim Authorization header (no "Bearer " prefix added).
pub async fn get_with_raw_auth(app: Router, uri: &str, raw_header: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, raw_header)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
