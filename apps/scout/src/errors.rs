use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::generation::relevance::ScoreError;
use crate::llm_client::LlmError;
use crate::marketplace::MarketplaceError;
use crate::notifier::NotifierError;
use crate::pipeline::RunSummary;
use crate::store::StoreError;

/// Run-level error type. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Marketplace error: {0}")]
    Marketplace(#[from] MarketplaceError),

    #[error("Seen-job store error: {0}")]
    Store(#[from] StoreError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoreError),

    #[error("Proposal drafting error: {0}")]
    Drafting(LlmError),

    #[error("Notification error: {0}")]
    Notifier(#[from] NotifierError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// What the entry point prints: a status code plus a JSON body.
#[derive(Debug, Serialize)]
pub struct RunEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

impl RunEnvelope {
    pub fn success(summary: &RunSummary) -> Self {
        Self {
            status_code: 200,
            body: json!({
                "fetched": summary.fetched,
                "passed_filters": summary.passed_filters,
                "shortlisted": summary.shortlisted,
            }),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (u16, &'static str) {
        match self {
            AppError::Config(_) => (500, "CONFIG_ERROR"),
            AppError::Marketplace(_) => (502, "MARKETPLACE_ERROR"),
            AppError::Store(_) => (500, "STORE_ERROR"),
            AppError::Scoring(ScoreError::Malformed(_)) => (502, "AI_RESPONSE_ERROR"),
            AppError::Scoring(ScoreError::Backend(_)) | AppError::Drafting(_) => (502, "LLM_ERROR"),
            AppError::Notifier(_) => (502, "NOTIFIER_ERROR"),
            AppError::Internal(_) => (500, "INTERNAL_ERROR"),
        }
    }

    pub fn into_envelope(self) -> RunEnvelope {
        let (status, code) = self.status_and_code();
        tracing::error!(code, "Run failed: {}", self);

        RunEnvelope {
            status_code: status,
            body: json!({
                "error": {
                    "code": code,
                    "message": self.to_string()
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let summary = RunSummary {
            fetched: 10,
            passed_filters: 4,
            shortlisted: 2,
        };
        let value = serde_json::to_value(RunEnvelope::success(&summary)).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "body": { "fetched": 10, "passed_filters": 4, "shortlisted": 2 }
            })
        );
    }

    #[test]
    fn test_malformed_score_envelope() {
        let envelope =
            AppError::Scoring(ScoreError::Malformed("EOF while parsing".to_string())).into_envelope();
        assert_eq!(envelope.status_code, 502);
        assert_eq!(envelope.body["error"]["code"], "AI_RESPONSE_ERROR");
        assert!(envelope.body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("EOF while parsing"));
    }

    #[test]
    fn test_unreachable_store_envelope() {
        let envelope =
            AppError::from(StoreError::UnsupportedScheme("mysql".to_string())).into_envelope();
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body["error"]["code"], "STORE_ERROR");
    }

    #[test]
    fn test_config_envelope_is_internal_status() {
        let envelope = AppError::Config("JOB_KEYWORDS is not set".to_string()).into_envelope();
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body["error"]["code"], "CONFIG_ERROR");
    }
}
