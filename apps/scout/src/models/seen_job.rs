use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status written for every record this pipeline creates.
pub const STATUS_SHORTLISTED: &str = "shortlisted";
/// Source tag for postings fetched from Freelancer.
pub const SOURCE_FREELANCER: &str = "freelancer";

/// Persisted proof that a job has been shortlisted. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeenJobRecord {
    pub project_id: String,
    pub title: String,
    pub status: String,
    pub ai_score: i64,
    pub first_seen_at: DateTime<Utc>,
    pub source: String,
}

impl SeenJobRecord {
    pub fn shortlisted(
        project_id: String,
        title: String,
        ai_score: i64,
        first_seen_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            title,
            status: STATUS_SHORTLISTED.to_string(),
            ai_score,
            first_seen_at,
            source: SOURCE_FREELANCER.to_string(),
        }
    }
}
