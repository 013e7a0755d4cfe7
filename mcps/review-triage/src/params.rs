//! Parameter types for review-triage tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for review_requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReviewRequestsParams {
    /// GitHub organization owning the teams (defaults to the configured org)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    /// Comma-separated team slugs (defaults to the configured teams)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<String>,
}

/// Parameters for pr_feedback
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PrFeedbackParams {
    /// Pull request number (defaults to the PR of the current branch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,

    /// Repository in OWNER/REPO format; requires `pr`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_deserializes() {
        let params: PrFeedbackParams = serde_json::from_str("{}").unwrap();
        assert!(params.pr.is_none());
        assert!(params.repo.is_none());
    }

    #[test]
    fn test_review_requests_params() {
        let params: ReviewRequestsParams =
            serde_json::from_str(r#"{"teams": "ingest, streaming-platform"}"#).unwrap();
        assert_eq!(params.teams.as_deref(), Some("ingest, streaming-platform"));
        assert!(params.org.is_none());
    }
}
