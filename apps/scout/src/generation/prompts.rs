// Prompt templates for relevance scoring and proposal drafting.
// Placeholders are filled with `str::replace` before sending.

/// Scoring prompt. Replace `{profile}`, `{title}`, `{description}`, `{budget}`.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"You are evaluating a freelance job for relevance to my skills.

My profile:
{profile}

Job:
Title: {title}
Description: {description}
Budget: {budget}

Score how well this job fits my profile from 0 (no fit) to 100 (perfect fit).

Return a JSON object with this EXACT schema (no extra fields):
{"score": 0, "reason": "short explanation"}"#;

/// Proposal prompt. Replace `{profile}`, `{title}`, `{description}`.
pub const PROPOSAL_PROMPT_TEMPLATE: &str = r#"Write a concise, professional freelance proposal.

Job:
Title: {title}
Description: {description}

My background:
{profile}

Rules:
- 5-7 sentences
- Mention the client's problem
- Explain approach
- End with a simple next step"#;
