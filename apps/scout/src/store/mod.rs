//! Seen-job store — point lookups and point writes keyed by project id.
//!
//! Only shortlisted jobs are ever written, so absence means "not yet
//! shortlisted" rather than "never fetched".

pub mod postgres;
pub mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::create_pool;
use crate::models::seen_job::SeenJobRecord;

pub use self::postgres::PgSeenJobStore;
pub use self::redis_store::RedisSeenJobStore;

/// Logical table / key namespace shared by both backends.
pub const SEEN_JOBS_TABLE: &str = "freelancer_jobs";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Record encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unsupported store URL scheme: {0}")]
    UnsupportedScheme(String),
}

#[async_trait]
pub trait SeenJobStore: Send + Sync {
    async fn exists(&self, project_id: &str) -> Result<bool, StoreError>;

    /// Writes the record unless one already exists for the id.
    async fn record(&self, record: &SeenJobRecord) -> Result<(), StoreError>;
}

/// Opens the backend named by the URL scheme.
pub async fn connect(database_url: &str) -> Result<Arc<dyn SeenJobStore>, StoreError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        let pool = create_pool(database_url).await?;
        let store = PgSeenJobStore::new(pool);
        store.ensure_schema().await?;
        Ok(Arc::new(store))
    } else if database_url.starts_with("redis://") {
        Ok(Arc::new(RedisSeenJobStore::connect(database_url).await?))
    } else {
        let scheme = database_url.split("://").next().unwrap_or_default();
        Err(StoreError::UnsupportedScheme(scheme.to_string()))
    }
}
