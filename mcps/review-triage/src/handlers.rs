//! Tool handlers
//!
//! Each handler resolves defaults, runs one pipeline, and turns the outcome
//! into a tool result.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;

use review_core::{parse_team_slugs, FeedbackRules};

use crate::config::Config;
use crate::error::TriageError;
use crate::gh::ReviewSource;
use crate::params::{PrFeedbackParams, ReviewRequestsParams};
use crate::pipeline::{self, FeedbackRequest};

/// Pretty JSON success response
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Tool-level failure carrying the `{"error": ...}` report
fn triage_failure(err: &TriageError) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(&err.to_report())
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

/// Team slugs from the call, falling back to the configured defaults
pub fn resolve_teams(raw: Option<&str>, config: &Config) -> Vec<String> {
    match raw {
        Some(raw) => parse_team_slugs(raw),
        None => config.review_requests.default_teams.clone(),
    }
}

pub async fn review_requests(
    source: &dyn ReviewSource,
    config: &Config,
    params: ReviewRequestsParams,
) -> Result<CallToolResult, McpError> {
    let org = params
        .org
        .unwrap_or_else(|| config.review_requests.default_org.clone());
    let teams = resolve_teams(params.teams.as_deref(), config);

    match pipeline::fetch_review_requests(source, &org, &teams).await {
        Ok(report) => json_success(&report),
        Err(TriageError::NoTeams) => Err(McpError::invalid_params(
            "no team slugs given and no default_teams configured",
            None,
        )),
        Err(e) => triage_failure(&e),
    }
}

pub async fn pr_feedback(
    source: &dyn ReviewSource,
    rules: &FeedbackRules,
    params: PrFeedbackParams,
) -> Result<CallToolResult, McpError> {
    let request = FeedbackRequest {
        repo: params.repo,
        pr: params.pr,
    };

    match pipeline::fetch_pr_feedback(source, rules, &request).await {
        Ok(report) => json_success(&report),
        Err(e) => triage_failure(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_teams_prefers_explicit() {
        let mut config = Config::default();
        config.review_requests.default_teams = vec!["ingest".to_string()];

        assert_eq!(resolve_teams(Some("a, b,"), &config), vec!["a", "b"]);
        assert_eq!(resolve_teams(None, &config), vec!["ingest"]);
    }

    #[test]
    fn test_json_success_is_pretty() {
        let result = json_success(&serde_json::json!({"total": 0})).unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_triage_failure_is_error() {
        let result = triage_failure(&TriageError::PullRequestNumberRequired).unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
