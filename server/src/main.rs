mod api;
mod auth;
mod db;
#[cfg(test)]
mod test_util;

use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::Router;
use chefai_core::ai::{AiProvider, OpenAiProvider};
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthProvider, SupabaseAuth};
use db::{MongoStore, RecipeStore};

/// Application state shared across all handlers.
///
/// Each external collaborator is optional: missing configuration disables
/// only the endpoints that need it, and those answer with a configuration
/// error instead of taking the whole process down.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub ai: Option<Arc<dyn AiProvider>>,
    pub auth: Option<Arc<dyn AuthProvider>>,
    pub store: Option<Arc<dyn RecipeStore>>,
}

impl AppState {
    fn from_env() -> Self {
        let ai = match OpenAiProvider::from_env() {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    "AI provider configured"
                );
                Some(Arc::new(provider) as Arc<dyn AiProvider>)
            }
            Err(e) => {
                tracing::warn!("recipe generation disabled: {}", e);
                None
            }
        };

        let auth = match SupabaseAuth::from_env() {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn AuthProvider>),
            Err(e) => {
                tracing::warn!("authenticated endpoints disabled: {}", e);
                None
            }
        };

        let store = match MongoStore::from_env() {
            Ok(store) => Some(Arc::new(store) as Arc<dyn RecipeStore>),
            Err(e) => {
                tracing::warn!("saved-recipe persistence disabled: {}", e);
                None
            }
        };

        Self { ai, auth, store }
    }
}

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    dotenvy::dotenv().ok();
    init_telemetry();

    let state = AppState::from_env();

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(api::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        );

    let addr = env::var("CHEFAI_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://localhost:3000/swagger-ui/");
    tracing::info!("OpenAPI spec available at http://localhost:3000/api-docs/openapi.json");

    axum::serve(listener, app).await.unwrap();
}
