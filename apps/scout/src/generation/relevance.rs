//! Relevance scoring — asks the scoring model how well a posting fits the
//! operator's profile.
//!
//! The threshold decision belongs to the pipeline; this module only produces
//! the number and its rationale.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::prompts::SCORE_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError, LlmRequest};
use crate::models::job::JobPosting;

/// Small, fast model for the per-job relevance check.
pub const SCORING_MODEL: &str = "claude-3-haiku-20240307";
const SCORING_MAX_TOKENS: u32 = 300;

/// Structured verdict returned by the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Expected 0–100; not clamped.
    pub score: f64,
    pub reason: String,
}

impl ScoreResult {
    /// Integer form stored on the seen-job record.
    pub fn points(&self) -> i64 {
        self.score.round() as i64
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    /// The backend answered with text that is not `{"score", "reason"}`.
    #[error("Malformed scoring response: {0}")]
    Malformed(String),

    #[error("Scoring backend failed: {0}")]
    Backend(#[source] LlmError),
}

impl From<LlmError> for ScoreError {
    fn from(e: LlmError) -> Self {
        if e.is_malformed_output() {
            ScoreError::Malformed(e.to_string())
        } else {
            ScoreError::Backend(e)
        }
    }
}

/// Scores a posting against the operator profile.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn score(&self, job: &JobPosting, profile: &str) -> Result<ScoreResult, ScoreError>;
}

pub struct LlmRelevanceScorer(pub LlmClient);

#[async_trait]
impl RelevanceScorer for LlmRelevanceScorer {
    async fn score(&self, job: &JobPosting, profile: &str) -> Result<ScoreResult, ScoreError> {
        let prompt = build_score_prompt(job, profile);
        let request = LlmRequest {
            model: SCORING_MODEL,
            max_tokens: SCORING_MAX_TOKENS,
            system: JSON_ONLY_SYSTEM,
        };
        Ok(self.0.call_json::<ScoreResult>(&prompt, request).await?)
    }
}

fn build_score_prompt(job: &JobPosting, profile: &str) -> String {
    SCORE_PROMPT_TEMPLATE
        .replace("{profile}", profile.trim())
        .replace("{title}", job.title())
        .replace("{description}", job.description())
        .replace("{budget}", &job.budget_summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_text;
    use serde_json::json;

    fn posting() -> JobPosting {
        serde_json::from_value(json!({
            "id": 7,
            "title": "Migrate Node.js API to AWS Lambda",
            "description": "Existing Express app needs to run serverless.",
            "budget": { "minimum": 500.0, "maximum": 1500.0 }
        }))
        .unwrap()
    }

    #[test]
    fn test_prompt_embeds_job_and_profile() {
        let prompt = build_score_prompt(&posting(), "  AWS and Node.js engineer \n");

        assert!(prompt.contains("Title: Migrate Node.js API to AWS Lambda"));
        assert!(prompt.contains("Description: Existing Express app needs to run serverless."));
        assert!(prompt.contains("Budget: 500 - 1500"));
        assert!(prompt.contains("My profile:\nAWS and Node.js engineer\n"));
        assert!(prompt.contains(r#"{"score": 0, "reason": "short explanation"}"#));
    }

    #[test]
    fn test_prompt_tolerates_missing_fields() {
        let job: JobPosting = serde_json::from_value(json!({ "id": 8 })).unwrap();
        let prompt = build_score_prompt(&job, "profile");
        assert!(prompt.contains("Title: \n"));
        assert!(prompt.contains("Budget: Not stated"));
    }

    #[test]
    fn test_score_result_parses_fenced_json() {
        let result: ScoreResult =
            parse_json_text("```json\n{\"score\": 82, \"reason\": \"Strong AWS overlap\"}\n```")
                .unwrap();
        assert_eq!(result.score, 82.0);
        assert_eq!(result.points(), 82);
        assert_eq!(result.reason, "Strong AWS overlap");
    }

    #[test]
    fn test_fractional_score_rounds_for_storage() {
        let result = ScoreResult {
            score: 74.6,
            reason: String::new(),
        };
        assert_eq!(result.points(), 75);
    }

    #[test]
    fn test_missing_reason_is_malformed() {
        let err: ScoreError = parse_json_text::<ScoreResult>("{\"score\": 90}")
            .unwrap_err()
            .into();
        assert!(matches!(err, ScoreError::Malformed(_)));
    }

    #[test]
    fn test_transport_failure_is_backend_error() {
        let err: ScoreError = LlmError::Api {
            status: 403,
            message: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, ScoreError::Backend(_)));
    }
}
