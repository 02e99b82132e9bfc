//! Filter engine — the cheap, pure gate applied before any I/O per job.

use crate::config::FilterCriteria;
use crate::models::job::JobPosting;

/// True when the posting satisfies every configured criterion.
///
/// Keyword match runs first since it rejects most postings. Missing fields
/// never error; they simply fail the relevant rule.
pub fn passes(job: &JobPosting, criteria: &FilterCriteria) -> bool {
    matches_keywords(job, &criteria.keywords)
        && meets_budget(job, criteria.min_budget)
        && (!criteria.require_payment_verified || job.payment_verified())
}

/// Any keyword is a case-insensitive substring of the title or description.
/// Keywords are expected lowercase already.
fn matches_keywords(job: &JobPosting, keywords: &[String]) -> bool {
    let title = job.title().to_lowercase();
    let description = job.description().to_lowercase();

    keywords
        .iter()
        .any(|k| title.contains(k.as_str()) || description.contains(k.as_str()))
}

/// A posting without a stated minimum budget is rejected.
fn meets_budget(job: &JobPosting, min_budget: f64) -> bool {
    job.budget_minimum().is_some_and(|min| min >= min_budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn criteria(require_verified: bool) -> FilterCriteria {
        FilterCriteria {
            keywords: vec!["react".to_string(), "aws".to_string()],
            min_budget: 250.0,
            require_payment_verified: require_verified,
        }
    }

    fn job(value: Value) -> JobPosting {
        serde_json::from_value(value).unwrap()
    }

    fn qualifying() -> Value {
        json!({
            "id": 1,
            "title": "Build a React admin panel",
            "description": "CRUD screens over an existing REST API.",
            "budget": { "minimum": 300.0, "maximum": 600.0 },
            "owner": { "payment_verified": true }
        })
    }

    #[test]
    fn test_qualifying_posting_passes() {
        assert!(passes(&job(qualifying()), &criteria(true)));
    }

    #[test]
    fn test_no_keyword_rejected() {
        let mut value = qualifying();
        value["title"] = json!("Logo design");
        value["description"] = json!("Need a vector logo for a bakery.");
        assert!(!passes(&job(value), &criteria(true)));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_in_description() {
        let mut value = qualifying();
        value["title"] = json!("Cloud migration");
        value["description"] = json!("Move our stack to AWS Fargate.");
        assert!(passes(&job(value), &criteria(true)));
    }

    #[test]
    fn test_keyword_matches_as_substring() {
        let mut value = qualifying();
        value["title"] = json!("ReactJS developer needed");
        assert!(passes(&job(value), &criteria(true)));
    }

    #[test]
    fn test_missing_title_and_description_rejected() {
        let mut value = qualifying();
        value["title"] = Value::Null;
        value.as_object_mut().unwrap().remove("description");
        assert!(!passes(&job(value), &criteria(false)));
    }

    #[test]
    fn test_budget_below_minimum_rejected() {
        let mut value = qualifying();
        value["budget"] = json!({ "minimum": 249.99 });
        assert!(!passes(&job(value), &criteria(false)));
    }

    #[test]
    fn test_budget_equal_to_minimum_passes() {
        let mut value = qualifying();
        value["budget"] = json!({ "minimum": 250 });
        assert!(passes(&job(value), &criteria(true)));
    }

    #[test]
    fn test_missing_budget_rejected() {
        let mut value = qualifying();
        value["budget"] = json!({ "maximum": 5000.0 });
        assert!(!passes(&job(value.clone()), &criteria(false)));

        value.as_object_mut().unwrap().remove("budget");
        assert!(!passes(&job(value), &criteria(false)));
    }

    #[test]
    fn test_unverified_owner_rejected_when_required() {
        let mut value = qualifying();
        value["owner"] = json!({ "payment_verified": false });
        assert!(!passes(&job(value.clone()), &criteria(true)));

        value["owner"] = json!({});
        assert!(!passes(&job(value.clone()), &criteria(true)));

        value["owner"] = Value::Null;
        assert!(!passes(&job(value), &criteria(true)));
    }

    #[test]
    fn test_verification_ignored_when_not_required() {
        let mut value = qualifying();
        value["owner"] = Value::Null;
        assert!(passes(&job(value.clone()), &criteria(false)));

        value["owner"] = json!({ "payment_verified": false });
        assert!(passes(&job(value), &criteria(false)));
    }
}
