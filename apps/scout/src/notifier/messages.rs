//! Message bodies sent to the operator, plus the display-time helpers they use.
//! Everything here is pure.

use chrono::{DateTime, Utc};

use crate::config::DisplayZone;
use crate::models::job::JobPosting;
use crate::pipeline::RunSummary;

const PROJECT_URL_BASE: &str = "https://www.freelancer.com/projects";

pub fn project_url(project_id: &str) -> String {
    format!("{PROJECT_URL_BASE}/{project_id}")
}

/// Renders an instant in the operator's zone, e.g. `05 Mar 2024, 02:30 PM IST`.
pub fn format_timestamp(at: DateTime<Utc>, zone: &DisplayZone) -> String {
    format!(
        "{} {}",
        at.with_timezone(&zone.offset).format("%d %b %Y, %I:%M %p"),
        zone.label
    )
}

/// Renders a posting's epoch-seconds timestamp; missing or zero is `Unknown`.
pub fn format_posted_time(epoch_secs: Option<i64>, zone: &DisplayZone) -> String {
    epoch_secs
        .filter(|ts| *ts != 0)
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .map(|at| format_timestamp(at, zone))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Per-job alert for a shortlisted posting.
pub fn shortlist_alert(
    job: &JobPosting,
    score_points: i64,
    proposal: &str,
    zone: &DisplayZone,
) -> String {
    let project_id = job.id.to_string();
    let verified = if job.payment_verified() { "Yes" } else { "No" };

    format!(
        "⭐ High-Match Job ({score_points}/100)\n\n\
         📌 {title}\n\
         🕒 Posted: {posted}\n\
         💳 Payment Verified: {verified}\n\n\
         📝 Proposal Draft:\n{proposal}\n\n\
         🔗 {url}",
        title = job.title(),
        posted = format_posted_time(job.submitdate, zone),
        url = project_url(&project_id),
    )
}

/// Summary sent only when a run shortlists nothing.
pub fn zero_match_summary(summary: &RunSummary, ran_at: DateTime<Utc>, zone: &DisplayZone) -> String {
    format!(
        "📊 Run Summary ({now})\n\n\
         Fetched: {fetched}\n\
         Passed filters: {passed}\n\
         Shortlisted: {shortlisted}\n\n\
         No high-match jobs found this run.",
        now = format_timestamp(ran_at, zone),
        fetched = summary.fetched,
        passed = summary.passed_filters,
        shortlisted = summary.shortlisted,
    )
}
