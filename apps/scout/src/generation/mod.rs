// AI-backed stages of the pipeline: relevance scoring and proposal drafting.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod prompts;
pub mod proposal;
pub mod relevance;
