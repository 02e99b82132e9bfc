use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

use super::{SeenJobStore, StoreError, SEEN_JOBS_TABLE};
use crate::models::seen_job::SeenJobRecord;

/// Stores each record as a JSON string under `freelancer_jobs:<project_id>`.
#[derive(Clone)]
pub struct RedisSeenJobStore {
    conn: MultiplexedConnection,
}

impl RedisSeenJobStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis seen-job store connected");
        Ok(Self { conn })
    }
}

fn record_key(project_id: &str) -> String {
    format!("{SEEN_JOBS_TABLE}:{project_id}")
}

#[async_trait]
impl SeenJobStore for RedisSeenJobStore {
    async fn exists(&self, project_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(record_key(project_id)).await?;
        Ok(found)
    }

    async fn record(&self, record: &SeenJobRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string(record)?;
        let mut conn = self.conn.clone();

        // NX keeps the first write; later writes for the same id are no-ops.
        let written: Option<String> = redis::cmd("SET")
            .arg(record_key(&record.project_id))
            .arg(payload)
            .arg("NX")
            .query_async(&mut conn)
            .await?;

        if written.is_none() {
            debug!(project_id = %record.project_id, "Seen-job record already present");
        }
        Ok(())
    }
}
