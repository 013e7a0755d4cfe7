//! Raw record shapes supplied by the GitHub collaborator
//!
//! These mirror the JSON returned by the REST API (`gh api ...`), the
//! GraphQL review-thread query, and `gh pr view --json`. Every field that
//! GitHub may omit or null out is optional here; the classification layer
//! decides what to drop.

use serde::{Deserialize, Serialize};

/// A GitHub account reference (`user`, `author`, team member)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    #[serde(default)]
    pub login: String,
}

/// Login of an optional actor, empty when GitHub returned `null` (deleted users)
pub fn login_of(actor: &Option<Login>) -> &str {
    actor.as_ref().map(|a| a.login.as_str()).unwrap_or_default()
}

// ============================================================================
// Teams and notifications
// ============================================================================

/// Entry of `orgs/{org}/teams/{slug}/members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub login: String,
}

/// Team metadata (`orgs/{org}/teams/{slug}`) or a requested-reviewer team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Display name, e.g. "Streaming Platform"
    #[serde(default)]
    pub name: Option<String>,

    /// URL slug, e.g. "streaming-platform"
    #[serde(default)]
    pub slug: Option<String>,
}

/// Entry of the `notifications` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub reason: String,
    #[serde(default)]
    pub unread: bool,
    pub subject: NotificationSubject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSubject {
    /// API URL of the subject; `null` for some subject types
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
}

// ============================================================================
// Pull requests
// ============================================================================

/// Subset of `repos/{repo}/pulls/{number}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullDetail {
    #[serde(default)]
    pub user: Option<Login>,

    /// Merge timestamp (ISO 8601), present once merged
    #[serde(default)]
    pub merged_at: Option<String>,

    /// "open" or "closed"
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub requested_teams: Vec<Team>,
}

/// `repos/{repo}/pulls/{number}/requested_reviewers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedReviewers {
    #[serde(default)]
    pub users: Vec<Login>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Output of `gh repo view --json owner,name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: Login,
    pub name: String,
}

impl RepoRef {
    /// Parse an `OWNER/REPO` string
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: Login {
                login: owner.to_string(),
            },
            name: name.to_string(),
        })
    }

    /// `OWNER/REPO`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Output of `gh pr view --json number,url,headRefName,author,reviews,reviewDecision`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrContext {
    pub number: u64,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub head_ref_name: Option<String>,

    #[serde(default)]
    pub author: Option<Login>,

    #[serde(default)]
    pub reviews: Vec<Review>,

    /// APPROVED, CHANGES_REQUESTED, REVIEW_REQUIRED, or empty
    #[serde(default)]
    pub review_decision: Option<String>,
}

impl PrContext {
    /// Fields to request from `gh pr view`
    pub fn view_fields() -> &'static [&'static str] {
        &[
            "number",
            "url",
            "headRefName",
            "author",
            "reviews",
            "reviewDecision",
        ]
    }
}

/// A submitted review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: Option<Login>,
    #[serde(default)]
    pub body: Option<String>,
    /// APPROVED, CHANGES_REQUESTED, COMMENTED, DISMISSED, PENDING
    #[serde(default)]
    pub state: String,
}

/// Review state that always produces blocking feedback
pub const CHANGES_REQUESTED: &str = "CHANGES_REQUESTED";

// ============================================================================
// Comments
// ============================================================================

/// A node of `pullRequest.reviewThreads` from the GraphQL API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewThread {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub is_outdated: bool,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub comments: ThreadComments,
}

impl ReviewThread {
    /// The comment that opened the thread
    pub fn first_comment(&self) -> Option<&ThreadComment> {
        self.comments.nodes.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadComments {
    #[serde(default)]
    pub nodes: Vec<ThreadComment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadComment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: Option<Login>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Entry of `repos/{repo}/issues/{number}/comments` (PR conversation)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub user: Option<Login>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse() {
        let repo = RepoRef::parse("getsentry/sentry").unwrap();
        assert_eq!(repo.owner.login, "getsentry");
        assert_eq!(repo.name, "sentry");
        assert_eq!(repo.slug(), "getsentry/sentry");

        assert!(RepoRef::parse("sentry").is_none());
        assert!(RepoRef::parse("/sentry").is_none());
        assert!(RepoRef::parse("a/b/c").is_none());
    }

    #[test]
    fn test_thread_deserializes_graphql_node() {
        let thread: ReviewThread = serde_json::from_value(serde_json::json!({
            "id": "PRRT_1",
            "isResolved": true,
            "isOutdated": false,
            "path": "src/lib.rs",
            "line": null,
            "comments": {"nodes": [
                {"id": "C1", "body": "nit: naming", "author": {"login": "bob"}, "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "C2", "body": "done", "author": null, "createdAt": "2024-01-02T00:00:00Z"}
            ]}
        }))
        .unwrap();

        assert!(thread.is_resolved);
        assert_eq!(thread.line, None);
        assert_eq!(login_of(&thread.first_comment().unwrap().author), "bob");
        assert_eq!(login_of(&thread.comments.nodes[1].author), "");
    }

    #[test]
    fn test_pr_context_tolerates_missing_fields() {
        let ctx: PrContext = serde_json::from_value(serde_json::json!({
            "number": 42,
            "author": {"login": "alice"},
            "reviewDecision": ""
        }))
        .unwrap();
        assert_eq!(ctx.number, 42);
        assert!(ctx.reviews.is_empty());
        assert_eq!(ctx.url, "");
    }
}
