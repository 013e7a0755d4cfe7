//! Review-request pipeline: roster → notifications → PR gate → relevance

use tracing::{debug, info, instrument, warn};

use review_core::records::Notification;
use review_core::relevance::{self, is_pending_review_request};
use review_core::{PullRef, PullRequestSummary, RelevanceRecord, RelevanceReport, Roster};

use crate::error::TriageError;
use crate::gh::ReviewSource;

/// Resolve members and display names for each team slug
///
/// A team whose lookups fail keeps its slot with no members and its slug as
/// display name.
#[instrument(skip(source))]
pub async fn resolve_roster(source: &dyn ReviewSource, org: &str, slugs: &[String]) -> Roster {
    let mut builder = Roster::builder();

    for slug in slugs {
        let members: Vec<String> = match source.team_members(org, slug).await {
            Ok(members) => members.into_iter().map(|m| m.login).collect(),
            Err(e) => {
                warn!(team = %slug, error = %e, "could not load team members");
                Vec::new()
            }
        };

        let name = match source.team(org, slug).await {
            Ok(team) => team.name,
            Err(e) => {
                warn!(team = %slug, error = %e, "could not load team metadata");
                None
            }
        };

        builder = builder.team(slug, name, members);
    }

    let roster = builder.build();
    info!(
        teams = roster.teams().len(),
        members = roster.member_count(),
        "resolved reviewer roster"
    );
    roster
}

/// Unread review requests for open PRs that concern `slugs`
#[instrument(skip(source))]
pub async fn fetch_review_requests(
    source: &dyn ReviewSource,
    org: &str,
    slugs: &[String],
) -> Result<RelevanceReport, TriageError> {
    if slugs.is_empty() {
        return Err(TriageError::NoTeams);
    }

    let roster = resolve_roster(source, org, slugs).await;

    let notifications = source.notifications().await.unwrap_or_else(|e| {
        warn!(error = %e, "could not load notifications");
        Vec::new()
    });
    let pending: Vec<&Notification> = notifications
        .iter()
        .filter(|n| is_pending_review_request(n))
        .collect();
    info!(
        total = notifications.len(),
        pending = pending.len(),
        "loaded notifications"
    );

    let mut prs = Vec::new();
    for notification in pending {
        if let Some(record) = review_notification(source, &roster, notification).await {
            prs.push(record);
        }
    }

    info!(relevant = prs.len(), "filtered review requests");
    Ok(RelevanceReport::new(prs))
}

async fn review_notification(
    source: &dyn ReviewSource,
    roster: &Roster,
    notification: &Notification,
) -> Option<RelevanceRecord> {
    let Some(url) = notification.subject.url.as_deref() else {
        debug!(id = %notification.id, "notification has no subject URL");
        return None;
    };
    let Some(pull) = PullRef::from_api_url(url) else {
        warn!(id = %notification.id, url, "subject is not a pull request URL");
        return None;
    };

    let detail = match source.pull_detail(&pull.repo, pull.number).await {
        Ok(detail) => detail,
        Err(e) => {
            warn!(repo = %pull.repo, number = pull.number, error = %e, "could not load PR");
            return None;
        }
    };

    // Gate on state before spending a call on requested reviewers
    let gate = PullRequestSummary::from_records(&pull, &detail, None)?;
    if gate.is_closed() {
        debug!(repo = %pull.repo, number = pull.number, "skipping merged or closed PR");
        return None;
    }

    let reviewers = match source.requested_reviewers(&pull.repo, pull.number).await {
        Ok(reviewers) => Some(reviewers),
        Err(e) => {
            warn!(repo = %pull.repo, number = pull.number, error = %e, "could not load requested reviewers");
            None
        }
    };
    let summary = PullRequestSummary::from_records(&pull, &detail, reviewers.as_ref())?;

    relevance::evaluate(roster, notification, &pull, &summary)
}
