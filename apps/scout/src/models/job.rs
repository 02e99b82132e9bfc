use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplace project identifier. The API returns integers, but string ids are
/// accepted so a schema change never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Numeric(id) => write!(f, "{id}"),
            ProjectId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Budget {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Owner {
    pub payment_verified: Option<bool>,
}

/// An active posting as returned by the marketplace. Everything but `id` is
/// optional; incomplete postings fail filters rather than decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: ProjectId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<Budget>,
    pub owner: Option<Owner>,
    /// Epoch seconds.
    pub submitdate: Option<i64>,
}

impl JobPosting {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn budget_minimum(&self) -> Option<f64> {
        self.budget.as_ref().and_then(|b| b.minimum)
    }

    /// Missing owner or flag counts as not verified.
    pub fn payment_verified(&self) -> bool {
        self.owner
            .as_ref()
            .and_then(|o| o.payment_verified)
            .unwrap_or(false)
    }

    /// Human-readable budget line for prompts.
    pub fn budget_summary(&self) -> String {
        match self.budget.as_ref() {
            Some(Budget {
                minimum: Some(min),
                maximum: Some(max),
            }) => format!("{min} - {max}"),
            Some(Budget {
                minimum: Some(min),
                maximum: None,
            }) => format!("from {min}"),
            Some(Budget {
                minimum: None,
                maximum: Some(max),
            }) => format!("up to {max}"),
            _ => "Not stated".to_string(),
        }
    }
}
