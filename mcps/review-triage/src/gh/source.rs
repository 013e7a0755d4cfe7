//! Record source backed by the gh CLI
//!
//! [`ReviewSource`] is the seam between the pipelines and GitHub: one method
//! per raw record shape. [`GhSource`] implements it with `gh api`,
//! `gh api graphql`, and `gh pr view`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use review_core::records::{
    IssueComment, Notification, PrContext, PullDetail, RepoRef, RequestedReviewers, ReviewThread,
    Team, TeamMember,
};

use super::error::GhResult;
use super::executor::{
    execute_gh_api, execute_gh_api_paginated, execute_gh_graphql, execute_gh_json, GraphQlVar,
};

/// Supplies raw GitHub records to the pipelines
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Members of `org/slug` (all pages)
    async fn team_members(&self, org: &str, slug: &str) -> GhResult<Vec<TeamMember>>;

    /// Metadata of `org/slug`
    async fn team(&self, org: &str, slug: &str) -> GhResult<Team>;

    /// Notifications of the authenticated user (all pages)
    async fn notifications(&self) -> GhResult<Vec<Notification>>;

    async fn pull_detail(&self, repo: &str, number: u64) -> GhResult<PullDetail>;

    async fn requested_reviewers(&self, repo: &str, number: u64) -> GhResult<RequestedReviewers>;

    /// Repository of the current working directory
    async fn current_repo(&self) -> GhResult<RepoRef>;

    /// PR context for `number`, or for the current branch when `None`
    async fn pr_context(&self, repo: &RepoRef, number: Option<u64>) -> GhResult<PrContext>;

    async fn review_threads(&self, repo: &RepoRef, number: u64) -> GhResult<Vec<ReviewThread>>;

    /// PR conversation comments (all pages)
    async fn conversation_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> GhResult<Vec<IssueComment>>;
}

const REVIEW_THREADS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $pr: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $pr) {
      reviewThreads(first: 100) {
        nodes {
          id
          isResolved
          isOutdated
          path
          line
          comments(first: 10) {
            nodes {
              id
              body
              author {
                login
              }
              createdAt
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct ThreadsData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    review_threads: ThreadConnection,
}

#[derive(Debug, Deserialize)]
struct ThreadConnection {
    #[serde(default)]
    nodes: Vec<ReviewThread>,
}

impl ThreadsData {
    fn into_threads(self) -> Vec<ReviewThread> {
        self.repository
            .and_then(|r| r.pull_request)
            .map(|pr| pr.review_threads.nodes)
            .unwrap_or_default()
    }
}

/// [`ReviewSource`] that shells out to `gh`
#[derive(Debug, Clone, Copy, Default)]
pub struct GhSource;

#[async_trait]
impl ReviewSource for GhSource {
    #[instrument(skip(self))]
    async fn team_members(&self, org: &str, slug: &str) -> GhResult<Vec<TeamMember>> {
        execute_gh_api_paginated(&format!("orgs/{}/teams/{}/members", org, slug)).await
    }

    #[instrument(skip(self))]
    async fn team(&self, org: &str, slug: &str) -> GhResult<Team> {
        execute_gh_api(&format!("orgs/{}/teams/{}", org, slug)).await
    }

    #[instrument(skip(self))]
    async fn notifications(&self) -> GhResult<Vec<Notification>> {
        execute_gh_api_paginated("notifications").await
    }

    #[instrument(skip(self))]
    async fn pull_detail(&self, repo: &str, number: u64) -> GhResult<PullDetail> {
        execute_gh_api(&format!("repos/{}/pulls/{}", repo, number)).await
    }

    #[instrument(skip(self))]
    async fn requested_reviewers(&self, repo: &str, number: u64) -> GhResult<RequestedReviewers> {
        execute_gh_api(&format!(
            "repos/{}/pulls/{}/requested_reviewers",
            repo, number
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn current_repo(&self) -> GhResult<RepoRef> {
        execute_gh_json(&["repo", "view"], &["owner", "name"]).await
    }

    #[instrument(skip(self), fields(repo = %repo.slug()))]
    async fn pr_context(&self, repo: &RepoRef, number: Option<u64>) -> GhResult<PrContext> {
        let slug = repo.slug();
        let number_str;

        // gh only resolves the current branch's PR without -R
        let mut args = vec!["pr", "view"];
        if let Some(n) = number {
            number_str = n.to_string();
            args.extend([number_str.as_str(), "-R", slug.as_str()]);
        }

        execute_gh_json(&args, PrContext::view_fields()).await
    }

    #[instrument(skip(self), fields(repo = %repo.slug()))]
    async fn review_threads(&self, repo: &RepoRef, number: u64) -> GhResult<Vec<ReviewThread>> {
        let data: ThreadsData = execute_gh_graphql(
            REVIEW_THREADS_QUERY,
            &[
                GraphQlVar::Str("owner", &repo.owner.login),
                GraphQlVar::Str("repo", &repo.name),
                GraphQlVar::Typed("pr", number.to_string()),
            ],
        )
        .await?;
        Ok(data.into_threads())
    }

    #[instrument(skip(self), fields(repo = %repo.slug()))]
    async fn conversation_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> GhResult<Vec<IssueComment>> {
        execute_gh_api_paginated(&format!("repos/{}/issues/{}/comments", repo.slug(), number))
            .await
    }
}
