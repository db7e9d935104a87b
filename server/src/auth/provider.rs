//! Remote auth-provider client.
//!
//! Identity lives entirely at the provider: a bearer token is exchanged
//! for the user it belongs to on every call, and nothing is cached
//! locally.

use async_trait::async_trait;
use serde::Deserialize;
use std::{env, fmt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("auth provider request failed: {0}")]
    RequestFailed(String),
}

/// Opaque identity returned by the auth provider. Only the id is kept;
/// records are owned and filtered by this string alone.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id: String,
}

/// Exchanges a bearer token for the identity it belongs to.
#[async_trait]
pub trait AuthProvider: Send + Sync + fmt::Debug {
    async fn get_user(&self, token: &str) -> Result<Identity, AuthProviderError>;
}

/// Supabase auth client using the server-side service-role key.
#[derive(Debug)]
pub struct SupabaseAuth {
    base_url: String,
    service_role_key: String,
    client: reqwest::Client,
}

impl SupabaseAuth {
    pub fn new(base_url: String, service_role_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from environment configuration.
    ///
    /// Required:
    /// - `SUPABASE_URL`: Project base URL
    /// - `SUPABASE_SERVICE_ROLE_KEY`: Server-side key for user lookup
    pub fn from_env() -> Result<Self, AuthProviderError> {
        let base_url = env::var("SUPABASE_URL")
            .map_err(|_| AuthProviderError::NotConfigured("SUPABASE_URL not set".to_string()))?;
        let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY").map_err(|_| {
            AuthProviderError::NotConfigured("SUPABASE_SERVICE_ROLE_KEY not set".to_string())
        })?;
        Ok(Self::new(base_url, service_role_key))
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn get_user(&self, token: &str) -> Result<Identity, AuthProviderError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.service_role_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthProviderError::InvalidToken);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthProviderError::RequestFailed(format!(
                "{}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<Identity>()
            .await
            .map_err(|e| AuthProviderError::RequestFailed(e.to_string()))
    }
}

#[cfg(test)]
pub mod testing {
    //! Fake auth provider for handler tests.

    use super::*;
    use std::collections::HashMap;

    /// Maps known tokens to user ids; everything else is rejected.
    #[derive(Debug, Default)]
    pub struct FakeAuth {
        tokens: HashMap<String, String>,
    }

    impl FakeAuth {
        /// A provider that rejects every token.
        pub fn rejecting() -> Self {
            Self::default()
        }

        pub fn add_token(&mut self, token: &str, user_id: &str) {
            self.tokens.insert(token.to_string(), user_id.to_string());
        }
    }

    #[async_trait]
    impl AuthProvider for FakeAuth {
        async fn get_user(&self, token: &str) -> Result<Identity, AuthProviderError> {
            match self.tokens.get(token) {
                Some(user_id) => Ok(Identity {
                    id: user_id.clone(),
                }),
                None => Err(AuthProviderError::InvalidToken),
            }
        }
    }
}
