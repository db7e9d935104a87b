use crate::api::ErrorResponse;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::provider::{AuthProvider, Identity};

/// Extractor that validates the Authorization header and resolves the
/// authenticated identity through the auth provider.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user.id is the provider's opaque identity string
/// }
/// ```
/// Because rejection happens here, a handler body never runs for an
/// unauthenticated request.
pub struct AuthUser(pub Identity);

pub enum AuthError {
    NotConfigured,
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error: auth provider not configured",
            ),
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Missing Authorization header"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Option<Arc<dyn AuthProvider>>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let provider =
            Option::<Arc<dyn AuthProvider>>::from_ref(state).ok_or(AuthError::NotConfigured)?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?;

        let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidFormat)?;

        // Re-validate on every call; there is no local session state.
        let identity = provider.get_user(token).await.map_err(|e| {
            tracing::debug!("token exchange rejected: {}", e);
            AuthError::InvalidToken
        })?;

        Ok(AuthUser(identity))
    }
}
