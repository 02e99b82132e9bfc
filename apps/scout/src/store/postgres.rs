use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{SeenJobStore, StoreError, SEEN_JOBS_TABLE};
use crate::models::seen_job::SeenJobRecord;

#[derive(Clone)]
pub struct PgSeenJobStore {
    pool: PgPool,
}

impl PgSeenJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {SEEN_JOBS_TABLE} (
                project_id    TEXT PRIMARY KEY,
                title         TEXT NOT NULL,
                status        TEXT NOT NULL,
                ai_score      BIGINT NOT NULL,
                first_seen_at TIMESTAMPTZ NOT NULL,
                source        TEXT NOT NULL
            )
            "#
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await?;

        info!(table = SEEN_JOBS_TABLE, "Seen-job table ready");
        Ok(())
    }
}

#[async_trait]
impl SeenJobStore for PgSeenJobStore {
    async fn exists(&self, project_id: &str) -> Result<bool, StoreError> {
        let found = sqlx::query_scalar::<_, bool>(&exists_sql())
            .bind(project_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found)
    }

    async fn record(&self, record: &SeenJobRecord) -> Result<(), StoreError> {
        let sql = insert_sql();
        let result = sqlx::query(&sql)
            .bind(&record.project_id)
            .bind(&record.title)
            .bind(&record.status)
            .bind(record.ai_score)
            .bind(record.first_seen_at)
            .bind(&record.source)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(project_id = %record.project_id, "Seen-job record already present");
        }
        Ok(())
    }
}

fn exists_sql() -> String {
    format!("SELECT EXISTS(SELECT 1 FROM {SEEN_JOBS_TABLE} WHERE project_id = $1)")
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO {SEEN_JOBS_TABLE}
            (project_id, title, status, ai_score, first_seen_at, source)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (project_id) DO NOTHING
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_use_shared_table_name() {
        assert!(exists_sql().contains(&format!("FROM {SEEN_JOBS_TABLE} WHERE")));
        assert!(insert_sql().contains(&format!("INSERT INTO {SEEN_JOBS_TABLE}")));
    }

    #[test]
    fn test_insert_keeps_first_write() {
        assert!(insert_sql().contains("ON CONFLICT (project_id) DO NOTHING"));
    }
}
