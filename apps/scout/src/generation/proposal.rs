//! Proposal drafting for shortlisted jobs. Output is free text, accepted as-is.

use async_trait::async_trait;

use crate::generation::prompts::PROPOSAL_PROMPT_TEMPLATE;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError, LlmRequest};
use crate::models::job::JobPosting;

/// Larger model, tuned for longer prose than the scorer.
pub const DRAFTING_MODEL: &str = "claude-3-5-sonnet-20240620";
const DRAFTING_MAX_TOKENS: u32 = 700;

#[async_trait]
pub trait ProposalDrafter: Send + Sync {
    async fn draft(&self, job: &JobPosting, profile: &str) -> Result<String, LlmError>;
}

pub struct LlmProposalDrafter(pub LlmClient);

#[async_trait]
impl ProposalDrafter for LlmProposalDrafter {
    async fn draft(&self, job: &JobPosting, profile: &str) -> Result<String, LlmError> {
        let prompt = build_proposal_prompt(job, profile);
        let request = LlmRequest {
            model: DRAFTING_MODEL,
            max_tokens: DRAFTING_MAX_TOKENS,
            system: PLAIN_TEXT_SYSTEM,
        };
        let text = self.0.call_text(&prompt, request).await?;
        Ok(text.trim().to_string())
    }
}

fn build_proposal_prompt(job: &JobPosting, profile: &str) -> String {
    PROPOSAL_PROMPT_TEMPLATE
        .replace("{title}", job.title())
        .replace("{description}", job.description())
        .replace("{profile}", profile.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_carries_rules_and_background() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": 11,
            "title": "React dashboard for logistics startup",
            "description": "Need charts and live updates over websockets."
        }))
        .unwrap();

        let prompt = build_proposal_prompt(&job, "Five years of React and Node.js.");

        assert!(prompt.contains("Title: React dashboard for logistics startup"));
        assert!(prompt.contains("Description: Need charts and live updates over websockets."));
        assert!(prompt.contains("My background:\nFive years of React and Node.js."));
        assert!(prompt.contains("- 5-7 sentences"));
        assert!(prompt.contains("- End with a simple next step"));
    }
}
