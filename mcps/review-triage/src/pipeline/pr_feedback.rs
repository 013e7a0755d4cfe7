//! PR feedback pipeline: context → threads + conversation → report

use tracing::{info, instrument, warn};

use review_core::records::RepoRef;
use review_core::{FeedbackReport, FeedbackRules};

use crate::error::TriageError;
use crate::gh::ReviewSource;

/// Which pull request to triage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackRequest {
    /// `OWNER/REPO`; the current directory's repository when `None`
    pub repo: Option<String>,
    /// PR number; the current branch's PR when `None`
    pub pr: Option<u64>,
}

async fn resolve_repo(
    source: &dyn ReviewSource,
    request: &FeedbackRequest,
) -> Result<RepoRef, TriageError> {
    match request.repo.as_deref() {
        Some(slug) => {
            if request.pr.is_none() {
                return Err(TriageError::PullRequestNumberRequired);
            }
            RepoRef::parse(slug).ok_or_else(|| TriageError::InvalidRepository(slug.to_string()))
        }
        None => source
            .current_repo()
            .await
            .map_err(TriageError::RepositoryUnavailable),
    }
}

/// Fetch and categorize all review feedback on one pull request
#[instrument(skip(source, rules))]
pub async fn fetch_pr_feedback(
    source: &dyn ReviewSource,
    rules: &FeedbackRules,
    request: &FeedbackRequest,
) -> Result<FeedbackReport, TriageError> {
    let repo = resolve_repo(source, request).await?;

    let ctx = source
        .pr_context(&repo, request.pr)
        .await
        .map_err(|e| match request.pr {
            Some(number) => TriageError::PullRequestNotFound { number, source: e },
            None => TriageError::NoPullRequestForBranch(e),
        })?;
    info!(repo = %repo.slug(), number = ctx.number, "loaded PR context");

    let threads = source
        .review_threads(&repo, ctx.number)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not load review threads");
            Vec::new()
        });

    let comments = source
        .conversation_comments(&repo, ctx.number)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not load conversation comments");
            Vec::new()
        });

    let report = FeedbackReport::from_records(rules, &ctx, &threads, &comments);
    info!(
        blocking = report.summary.blocking,
        suggestions = report.summary.suggestions,
        bot = report.summary.bot_comments,
        resolved = report.summary.resolved,
        "classified PR feedback"
    );
    Ok(report)
}
