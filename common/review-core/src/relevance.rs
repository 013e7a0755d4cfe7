//! Review-request relevance filtering
//!
//! Decides which unread `review_requested` notifications concern a set of
//! teams: either the PR was opened by a team member, or one of the teams was
//! asked for review. Merged and closed PRs are always dropped.

use serde::Serialize;
use tracing::debug;

use crate::records::{login_of, Notification, PullDetail, RepoRef, RequestedReviewers, Team};
use crate::roster::{Roster, RosterTeam};

/// Notification reason for review requests
pub const REVIEW_REQUESTED: &str = "review_requested";

/// Unread review-request notifications are the only ones considered
pub fn is_pending_review_request(notification: &Notification) -> bool {
    notification.unread && notification.reason == REVIEW_REQUESTED
}

/// A pull request located from its API URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRef {
    /// `OWNER/REPO`
    pub repo: String,
    pub number: u64,
    /// Browser URL of the pull request
    pub html_url: String,
}

impl PullRef {
    /// Parse `https://api.github.com/repos/O/R/pulls/N` (or the GitHub
    /// Enterprise form `https://HOST/api/v3/repos/O/R/pulls/N`).
    pub fn from_api_url(api_url: &str) -> Option<Self> {
        let (api_base, rest) = api_url.split_once("/repos/")?;
        let (repo, number) = rest.rsplit_once("/pulls/")?;
        let number: u64 = number.trim_end_matches('/').parse().ok()?;
        RepoRef::parse(repo)?;

        Some(Self {
            html_url: format!("{}/{}/pull/{}", web_base(api_base), repo, number),
            repo: repo.to_string(),
            number,
        })
    }
}

fn web_base(api_base: &str) -> String {
    if let Some(enterprise) = api_base.strip_suffix("/api/v3") {
        return enterprise.to_string();
    }
    match api_base.split_once("://") {
        Some((scheme, host)) => {
            format!("{}://{}", scheme, host.strip_prefix("api.").unwrap_or(host))
        }
        None => api_base.to_string(),
    }
}

/// State and reviewer requests of one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub repo: String,
    pub number: u64,
    pub author: String,
    pub merged: bool,
    pub state: String,
    pub requested_teams: Vec<Team>,
}

impl PullRequestSummary {
    /// Combine PR detail with its requested reviewers. Returns `None` when
    /// the PR has no author login.
    ///
    /// Teams come from the requested-reviewers record when it lists any,
    /// otherwise from the detail's own `requested_teams`.
    pub fn from_records(
        pull: &PullRef,
        detail: &PullDetail,
        reviewers: Option<&RequestedReviewers>,
    ) -> Option<Self> {
        let author = login_of(&detail.user);
        if author.is_empty() {
            return None;
        }

        let requested_teams = match reviewers {
            Some(r) if !r.teams.is_empty() => r.teams.clone(),
            _ => detail.requested_teams.clone(),
        };

        Some(Self {
            repo: pull.repo.clone(),
            number: pull.number,
            author: author.to_string(),
            merged: detail.merged_at.as_deref().is_some_and(|m| !m.is_empty()),
            state: detail.state.clone(),
            requested_teams,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.merged || self.state.eq_ignore_ascii_case("closed")
    }
}

/// A review request worth looking at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevanceRecord {
    pub notification_id: String,
    pub title: String,
    pub url: String,
    pub repo: String,
    pub pr_number: u64,
    pub author: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelevanceReport {
    pub total: usize,
    pub prs: Vec<RelevanceRecord>,
}

impl RelevanceReport {
    pub fn new(prs: Vec<RelevanceRecord>) -> Self {
        Self {
            total: prs.len(),
            prs,
        }
    }
}

/// Lowercase, with every run of non-alphanumerics collapsed to `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn team_matches(requested: &Team, team: &RosterTeam) -> bool {
    if let Some(slug) = requested.slug.as_deref() {
        if same_name(slug, &team.slug) {
            return true;
        }
    }
    match requested.name.as_deref() {
        Some(name) => {
            same_name(name, &team.slug)
                || same_name(name, &team.name)
                || slugify(name) == team.slug.to_lowercase()
        }
        None => false,
    }
}

/// Display names of requested teams that belong to the roster, in roster
/// order, each listed once
pub fn matching_teams(roster: &Roster, requested: &[Team]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for team in roster.teams() {
        for candidate in requested.iter().filter(|r| team_matches(r, team)) {
            let name = candidate
                .name
                .clone()
                .or_else(|| candidate.slug.clone())
                .unwrap_or_else(|| team.name.clone());
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Decide whether a review request is relevant to the roster
pub fn evaluate(
    roster: &Roster,
    notification: &Notification,
    pull: &PullRef,
    pr: &PullRequestSummary,
) -> Option<RelevanceRecord> {
    if pr.is_closed() {
        debug!(repo = %pr.repo, number = pr.number, "skipping merged or closed PR");
        return None;
    }

    let teams = matching_teams(roster, &pr.requested_teams);
    let by_team_member = roster.is_member(&pr.author);
    if teams.is_empty() && !by_team_member {
        debug!(repo = %pr.repo, number = pr.number, "review request not relevant");
        return None;
    }

    let mut reasons = Vec::with_capacity(2);
    if !teams.is_empty() {
        reasons.push(format!("review requested from: {}", teams.join(", ")));
    }
    if by_team_member {
        reasons.push(format!("opened by: {}", pr.author));
    }

    Some(RelevanceRecord {
        notification_id: notification.id.clone(),
        title: notification.subject.title.clone(),
        url: pull.html_url.clone(),
        repo: pr.repo.clone(),
        pr_number: pr.number,
        author: pr.author.clone(),
        reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Login, NotificationSubject};

    const API_URL: &str = "https://api.github.com/repos/getsentry/sentry/pulls/1234";

    fn roster() -> Roster {
        Roster::builder()
            .team(
                "streaming-platform",
                Some("Streaming Platform".to_string()),
                ["alice", "bob"],
            )
            .team("ingest", Some("Ingest".to_string()), ["carol"])
            .build()
    }

    fn notification() -> Notification {
        Notification {
            id: "n-1".to_string(),
            reason: REVIEW_REQUESTED.to_string(),
            unread: true,
            subject: NotificationSubject {
                url: Some(API_URL.to_string()),
                title: "Speed up consumer".to_string(),
            },
        }
    }

    fn team(name: &str) -> Team {
        Team {
            name: Some(name.to_string()),
            slug: None,
        }
    }

    fn summary(author: &str, teams: Vec<Team>) -> PullRequestSummary {
        PullRequestSummary {
            repo: "getsentry/sentry".to_string(),
            number: 1234,
            author: author.to_string(),
            merged: false,
            state: "open".to_string(),
            requested_teams: teams,
        }
    }

    fn run(pr: &PullRequestSummary) -> Option<RelevanceRecord> {
        let pull = PullRef::from_api_url(API_URL).unwrap();
        evaluate(&roster(), &notification(), &pull, pr)
    }

    #[test]
    fn test_pull_ref_from_api_url() {
        let pull = PullRef::from_api_url(API_URL).unwrap();
        assert_eq!(pull.repo, "getsentry/sentry");
        assert_eq!(pull.number, 1234);
        assert_eq!(pull.html_url, "https://github.com/getsentry/sentry/pull/1234");
    }

    #[test]
    fn test_pull_ref_enterprise_url() {
        let pull =
            PullRef::from_api_url("https://git.example.com/api/v3/repos/infra/deploy/pulls/9")
                .unwrap();
        assert_eq!(pull.html_url, "https://git.example.com/infra/deploy/pull/9");
    }

    #[test]
    fn test_pull_ref_rejects_non_pulls() {
        assert!(PullRef::from_api_url("https://api.github.com/repos/o/r/issues/5").is_none());
        assert!(PullRef::from_api_url("https://api.github.com/repos/o/r/pulls/abc").is_none());
    }

    #[test]
    fn test_pending_review_request() {
        let mut n = notification();
        assert!(is_pending_review_request(&n));
        n.unread = false;
        assert!(!is_pending_review_request(&n));
        n.unread = true;
        n.reason = "mention".to_string();
        assert!(!is_pending_review_request(&n));
    }

    #[test]
    fn test_opened_by_member() {
        let record = run(&summary("alice", vec![])).unwrap();
        assert_eq!(record.reasons, vec!["opened by: alice"]);
        assert_eq!(record.url, "https://github.com/getsentry/sentry/pull/1234");
        assert_eq!(record.notification_id, "n-1");
    }

    #[test]
    fn test_team_display_name_matches_slug() {
        let record = run(&summary("zed", vec![team("Streaming Platform")])).unwrap();
        assert_eq!(
            record.reasons,
            vec!["review requested from: Streaming Platform"]
        );
    }

    #[test]
    fn test_team_reason_precedes_author_reason() {
        let record = run(&summary(
            "bob",
            vec![team("Ingest"), team("streaming-platform"), team("Other")],
        ))
        .unwrap();
        assert_eq!(
            record.reasons,
            vec![
                "review requested from: streaming-platform, Ingest",
                "opened by: bob"
            ]
        );
    }

    #[test]
    fn test_merged_pr_excluded() {
        let mut pr = summary("alice", vec![team("Streaming Platform")]);
        pr.merged = true;
        assert!(run(&pr).is_none());

        let mut pr = summary("alice", vec![team("Streaming Platform")]);
        pr.state = "closed".to_string();
        assert!(run(&pr).is_none());
    }

    #[test]
    fn test_unrelated_pr_excluded() {
        assert!(run(&summary("zed", vec![team("Other")])).is_none());
    }

    #[test]
    fn test_summary_from_records() {
        let pull = PullRef::from_api_url(API_URL).unwrap();
        let detail = PullDetail {
            user: Some(Login {
                login: "alice".to_string(),
            }),
            merged_at: None,
            state: "open".to_string(),
            requested_teams: vec![team("Fallback")],
        };

        let pr = PullRequestSummary::from_records(&pull, &detail, None).unwrap();
        assert_eq!(pr.requested_teams, vec![team("Fallback")]);
        assert!(!pr.is_closed());

        let reviewers = RequestedReviewers {
            users: vec![],
            teams: vec![team("Streaming Platform")],
        };
        let pr = PullRequestSummary::from_records(&pull, &detail, Some(&reviewers)).unwrap();
        assert_eq!(pr.requested_teams, vec![team("Streaming Platform")]);

        let anonymous = PullDetail::default();
        assert!(PullRequestSummary::from_records(&pull, &anonymous, None).is_none());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Streaming Platform"), "streaming-platform");
        assert_eq!(slugify("  SDK / Web  "), "sdk-web");
    }
}
