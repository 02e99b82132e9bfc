//! Freelancer marketplace client — paginated fetch of active projects.
//!
//! Pages are requested in order until one comes back empty or `max_pages`
//! requests have been made. Any failure aborts the whole fetch.

use std::future::Future;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::MarketplaceSettings;
use crate::models::job::JobPosting;

const ACTIVE_PROJECTS_URL: &str = "https://www.freelancer.com/api/projects/0.1/projects/active";

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Marketplace API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode marketplace response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of active postings for a run.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_active_postings(
        &self,
        query_terms: &[String],
    ) -> Result<Vec<JobPosting>, MarketplaceError>;
}

#[derive(Debug, Default, Deserialize)]
struct ActiveProjectsResponse {
    #[serde(default)]
    result: Option<ActiveProjectsResult>,
}

#[derive(Debug, Default, Deserialize)]
struct ActiveProjectsResult {
    #[serde(default)]
    projects: Option<Vec<JobPosting>>,
}

impl ActiveProjectsResponse {
    fn into_projects(self) -> Vec<JobPosting> {
        self.result.and_then(|r| r.projects).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct FreelancerClient {
    client: Client,
    settings: MarketplaceSettings,
}

impl FreelancerClient {
    pub fn new(settings: MarketplaceSettings) -> Result<Self, MarketplaceError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            settings,
        })
    }

    async fn fetch_page(&self, query: &str, offset: u32) -> Result<Vec<JobPosting>, MarketplaceError> {
        let response = self
            .client
            .get(ACTIVE_PROJECTS_URL)
            .bearer_auth(&self.settings.access_token)
            .header("Accept", "application/json")
            .query(&page_query(query, self.settings.page_limit, offset))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MarketplaceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let projects = serde_json::from_str::<ActiveProjectsResponse>(&body)?.into_projects();
        debug!(offset, count = projects.len(), "Fetched marketplace page");
        Ok(projects)
    }
}

#[async_trait]
impl JobSource for FreelancerClient {
    async fn fetch_active_postings(
        &self,
        query_terms: &[String],
    ) -> Result<Vec<JobPosting>, MarketplaceError> {
        let query = query_terms.join(" ");
        let query = query.as_str();
        let postings = paginate(self.settings.page_limit, self.settings.max_pages, move |offset| {
            self.fetch_page(query, offset)
        })
        .await?;

        info!(count = postings.len(), "Fetched active postings");
        Ok(postings)
    }
}

fn page_query(query: &str, limit: u32, offset: u32) -> [(&'static str, String); 3] {
    [
        ("query", query.to_string()),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ]
}

/// Drives page requests at offsets `0, limit, 2*limit, ...`, stopping at the
/// first empty page or after `max_pages` requests.
async fn paginate<F, Fut, E>(page_limit: u32, max_pages: u32, mut fetch_page: F) -> Result<Vec<JobPosting>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<JobPosting>, E>>,
{
    let mut all = Vec::new();

    for page in 0..max_pages {
        let projects = fetch_page(page * page_limit).await?;
        if projects.is_empty() {
            break;
        }
        all.extend(projects);
    }

    Ok(all)
}
