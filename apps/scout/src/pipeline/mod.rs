//! Job pipeline — fetch → filter → dedupe → score → record → draft → notify.
//!
//! Jobs are processed one at a time, end to end. Each gate may end a job
//! quietly; any collaborator error aborts the run. The shortlist fact is
//! recorded before drafting and notification, so a failed delivery never
//! loses it.

pub mod filter;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::proposal::ProposalDrafter;
use crate::generation::relevance::{RelevanceScorer, ScoreError};
use crate::marketplace::JobSource;
use crate::models::job::JobPosting;
use crate::models::seen_job::SeenJobRecord;
use crate::notifier::messages::{shortlist_alert, zero_match_summary};
use crate::notifier::Notifier;
use crate::store::SeenJobStore;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fetched: usize,
    pub passed_filters: usize,
    pub shortlisted: usize,
}

/// Where a single job stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
enum JobOutcome {
    FilteredOut,
    AlreadyShortlisted,
    BelowThreshold,
    SkippedMalformedScore,
    Shortlisted,
}

impl JobOutcome {
    fn passed_filters(self) -> bool {
        !matches!(self, JobOutcome::FilteredOut)
    }
}

pub struct Pipeline {
    config: Arc<Config>,
    source: Arc<dyn JobSource>,
    store: Arc<dyn SeenJobStore>,
    scorer: Arc<dyn RelevanceScorer>,
    drafter: Arc<dyn ProposalDrafter>,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn JobSource>,
        store: Arc<dyn SeenJobStore>,
        scorer: Arc<dyn RelevanceScorer>,
        drafter: Arc<dyn ProposalDrafter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            scorer,
            drafter,
            notifier,
        }
    }

    /// Runs one pass over the marketplace and returns the run counters.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let postings = self
            .source
            .fetch_active_postings(&self.config.criteria.keywords)
            .await?;

        let mut summary = RunSummary {
            fetched: postings.len(),
            ..RunSummary::default()
        };

        for job in &postings {
            let outcome = self.process(job).await?;
            if outcome.passed_filters() {
                summary.passed_filters += 1;
            }
            if outcome == JobOutcome::Shortlisted {
                summary.shortlisted += 1;
            }
        }

        info!(
            fetched = summary.fetched,
            passed_filters = summary.passed_filters,
            shortlisted = summary.shortlisted,
            "Run complete"
        );

        if summary.shortlisted == 0 {
            let text = zero_match_summary(&summary, Utc::now(), &self.config.display_zone);
            self.notifier.notify(&text).await?;
        }

        Ok(summary)
    }

    async fn process(&self, job: &JobPosting) -> Result<JobOutcome, AppError> {
        let project_id = job.id.to_string();

        if !filter::passes(job, &self.config.criteria) {
            debug!(%project_id, "Rejected by filters");
            return Ok(JobOutcome::FilteredOut);
        }

        if self.store.exists(&project_id).await? {
            debug!(%project_id, "Already shortlisted on an earlier run");
            return Ok(JobOutcome::AlreadyShortlisted);
        }

        let verdict = match self.scorer.score(job, &self.config.profile_summary).await {
            Ok(verdict) => verdict,
            Err(ScoreError::Malformed(reason)) if self.config.skip_malformed_scores => {
                warn!(%project_id, %reason, "Skipping job with unparseable score");
                return Ok(JobOutcome::SkippedMalformedScore);
            }
            Err(e) => return Err(e.into()),
        };

        if verdict.score < self.config.score_threshold {
            debug!(%project_id, score = verdict.score, "Below score threshold");
            return Ok(JobOutcome::BelowThreshold);
        }

        let points = verdict.points();
        info!(%project_id, score = points, reason = %verdict.reason, "Shortlisted");

        let record = SeenJobRecord::shortlisted(
            project_id,
            job.title().to_string(),
            points,
            Utc::now(),
        );
        self.store.record(&record).await?;

        let proposal = self
            .drafter
            .draft(job, &self.config.profile_summary)
            .await
            .map_err(AppError::Drafting)?;

        let text = shortlist_alert(job, points, &proposal, &self.config.display_zone);
        self.notifier.notify(&text).await?;

        Ok(JobOutcome::Shortlisted)
    }
}
