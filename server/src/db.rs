//! MongoDB-backed persistence for saved recipes.
//!
//! The handle to the document store is established lazily on first use
//! and then reused for the lifetime of the process. The store itself is
//! reached through the [`RecipeStore`] trait so handler tests can run
//! against an in-memory double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use thiserror::Error;
use tokio::sync::OnceCell;
use utoipa::ToSchema;

/// Collection holding one document per saved recipe.
const COLLECTION: &str = "saved_recipes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Could not connect to the database: {0}")]
    Connect(String),

    #[error("Failed to write record: {0}")]
    Write(String),

    #[error("Failed to query records: {0}")]
    Query(String),
}

/// Durable shape of one saved recipe document, exactly as stored.
///
/// Records are insert-only: they are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipeRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Opaque identity from the auth provider; the only read-access filter.
    pub user_id: String,
    /// The recipe exactly as the client saved it.
    pub recipe: Value,
    pub image_url: String,
    pub saved_at: mongodb::bson::DateTime,
}

/// A saved recipe as returned by the history endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    /// Database-generated identifier, hex-encoded.
    pub id: String,
    pub user_id: String,
    #[schema(value_type = Object)]
    pub recipe: Value,
    pub image_url: String,
    pub saved_at: DateTime<Utc>,
}

impl From<SavedRecipeRecord> for SavedRecipe {
    fn from(record: SavedRecipeRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: record.user_id,
            recipe: record.recipe,
            image_url: record.image_url,
            saved_at: record.saved_at.to_chrono(),
        }
    }
}

/// Persistence seam for saved recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync + std::fmt::Debug {
    /// Insert a new record stamped with the current time; returns the
    /// database-generated identifier.
    async fn insert(
        &self,
        user_id: &str,
        recipe: Value,
        image_url: String,
    ) -> Result<String, StoreError>;

    /// All records belonging to `user_id`, newest first. The full set is
    /// returned; history is unpaginated by design.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedRecipe>, StoreError>;
}

/// Document store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub db_name: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `MONGO_URI`: MongoDB connection string
    ///
    /// Optional:
    /// - `MONGO_DB_NAME`: Database name (default: "chefai")
    pub fn from_env() -> Result<Self, StoreError> {
        let uri = env::var("MONGO_URI")
            .map_err(|_| StoreError::MissingEnvVar("MONGO_URI".to_string()))?;
        let db_name = env::var("MONGO_DB_NAME").unwrap_or_else(|_| "chefai".to_string());
        Ok(Self { uri, db_name })
    }
}

/// MongoDB store with a lazily-initialized, process-wide client handle.
///
/// Constructed once by the composition root and injected through state;
/// `OnceCell` guarantees at most one client is ever created no matter how
/// many requests race on first use. The driver's handle is safe for
/// concurrent use once established. There is no explicit teardown.
#[derive(Debug)]
pub struct MongoStore {
    config: StoreConfig,
    client: OnceCell<Client>,
}

impl MongoStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    async fn client(&self) -> Result<&Client, StoreError> {
        self.client
            .get_or_try_init(|| async {
                Client::with_uri_str(&self.config.uri)
                    .await
                    .map_err(|e| StoreError::Connect(e.to_string()))
            })
            .await
    }

    async fn collection(&self) -> Result<Collection<SavedRecipeRecord>, StoreError> {
        let client = self.client().await?;
        Ok(client.database(&self.config.db_name).collection(COLLECTION))
    }
}

#[async_trait]
impl RecipeStore for MongoStore {
    async fn insert(
        &self,
        user_id: &str,
        recipe: Value,
        image_url: String,
    ) -> Result<String, StoreError> {
        let collection = self.collection().await?;

        let record = SavedRecipeRecord {
            id: None,
            user_id: user_id.to_string(),
            recipe,
            image_url,
            saved_at: mongodb::bson::DateTime::now(),
        };

        let result = collection
            .insert_one(&record)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id.to_hex()),
            other => Ok(other.to_string()),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedRecipe>, StoreError> {
        let collection = self.collection().await?;

        // The sort happens at query time; records are written unordered.
        // An index on {userId, savedAt} is recommended for this pattern.
        let cursor = collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "savedAt": -1 })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let records: Vec<SavedRecipeRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(records.into_iter().map(SavedRecipe::from).collect())
    }
}
