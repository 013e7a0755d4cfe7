//! Feedback report assembly

use serde::Serialize;

use crate::feedback::{CommentAggregator, FeedbackBuckets};
use crate::patterns::FeedbackRules;
use crate::records::{login_of, IssueComment, PrContext, ReviewThread};

/// Pull request identity echoed at the top of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrIdentity {
    pub number: u64,
    pub url: String,
    pub author: String,
    pub review_decision: String,
}

impl PrIdentity {
    pub fn from_context(ctx: &PrContext) -> Self {
        Self {
            number: ctx.number,
            url: ctx.url.clone(),
            author: login_of(&ctx.author).to_string(),
            review_decision: ctx.review_decision.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackSummary {
    pub blocking: usize,
    pub suggestions: usize,
    pub bot_comments: usize,
    pub resolved: usize,
    pub needs_attention: usize,
}

impl FeedbackSummary {
    pub fn of(buckets: &FeedbackBuckets) -> Self {
        let blocking = buckets.blocking.len();
        let suggestions = buckets.suggestion.len();
        Self {
            blocking,
            suggestions,
            bot_comments: buckets.bot.len(),
            resolved: buckets.resolved.len(),
            needs_attention: blocking + suggestions,
        }
    }
}

/// What the agent should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionRequired {
    #[serde(rename = "Address blocking feedback before merge")]
    AddressBlocking,
    #[serde(rename = "Review suggestions - ask user which to address")]
    ReviewSuggestions,
}

impl ActionRequired {
    /// Blocking feedback always takes precedence over suggestions
    pub fn for_buckets(buckets: &FeedbackBuckets) -> Option<Self> {
        if !buckets.blocking.is_empty() {
            Some(Self::AddressBlocking)
        } else if !buckets.suggestion.is_empty() {
            Some(Self::ReviewSuggestions)
        } else {
            None
        }
    }
}

/// Categorized feedback for one pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    pub pr: PrIdentity,
    pub summary: FeedbackSummary,
    pub feedback: FeedbackBuckets,
    pub action_required: Option<ActionRequired>,
}

impl FeedbackReport {
    pub fn new(pr: PrIdentity, feedback: FeedbackBuckets) -> Self {
        Self {
            pr,
            summary: FeedbackSummary::of(&feedback),
            action_required: ActionRequired::for_buckets(&feedback),
            feedback,
        }
    }

    /// Run the full aggregation over raw records and build the report
    pub fn from_records(
        rules: &FeedbackRules,
        ctx: &PrContext,
        threads: &[ReviewThread],
        comments: &[IssueComment],
    ) -> Self {
        let pr = PrIdentity::from_context(ctx);

        let mut aggregator = CommentAggregator::new(rules, &pr.author);
        aggregator.add_reviews(&ctx.reviews);
        aggregator.add_threads(threads);
        aggregator.add_conversation(comments);
        let feedback = aggregator.finish();

        Self::new(pr, feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackItem;
    use serde_json::json;

    fn context() -> PrContext {
        serde_json::from_value(json!({
            "number": 7,
            "url": "https://github.com/o/r/pull/7",
            "author": {"login": "alice"},
            "reviewDecision": "CHANGES_REQUESTED",
            "reviews": [
                {"author": {"login": "bob"}, "body": "Please address the lock ordering", "state": "CHANGES_REQUESTED"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_action_precedence() {
        let mut buckets = FeedbackBuckets::default();
        assert_eq!(ActionRequired::for_buckets(&buckets), None);

        buckets.suggestion.push(FeedbackItem::new("bob", "nit: x"));
        assert_eq!(
            ActionRequired::for_buckets(&buckets),
            Some(ActionRequired::ReviewSuggestions)
        );

        buckets.blocking.push(FeedbackItem::new("bob", "must fix"));
        assert_eq!(
            ActionRequired::for_buckets(&buckets),
            Some(ActionRequired::AddressBlocking)
        );
    }

    #[test]
    fn test_bot_and_resolved_only_need_no_action() {
        let mut buckets = FeedbackBuckets::default();
        buckets.bot.push(FeedbackItem::new("codecov", "coverage report"));
        buckets.resolved.push(FeedbackItem::new("bob", "fixed now"));
        let report = FeedbackReport::new(PrIdentity::from_context(&context()), buckets);
        assert_eq!(report.action_required, None);
        assert_eq!(report.summary.needs_attention, 0);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["action_required"].is_null());
    }

    #[test]
    fn test_report_json_shape() {
        let threads: Vec<ReviewThread> = serde_json::from_value(json!([
            {"id": "T1", "isResolved": false, "isOutdated": true, "path": "a.rs", "line": 3,
             "comments": {"nodes": [{"body": "could also use an iterator", "author": {"login": "carol"}}]}}
        ]))
        .unwrap();
        let comments: Vec<IssueComment> = serde_json::from_value(json!([
            {"user": {"login": "dependabot[bot]"}, "body": "Bumps serde", "html_url": "https://x/1"}
        ]))
        .unwrap();

        let report =
            FeedbackReport::from_records(&FeedbackRules::builtin(), &context(), &threads, &comments);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pr"]["number"], 7);
        assert_eq!(json["pr"]["author"], "alice");
        assert_eq!(json["pr"]["review_decision"], "CHANGES_REQUESTED");
        assert_eq!(json["summary"]["blocking"], 1);
        assert_eq!(json["summary"]["suggestions"], 1);
        assert_eq!(json["summary"]["bot_comments"], 1);
        assert_eq!(json["summary"]["resolved"], 0);
        assert_eq!(json["summary"]["needs_attention"], 2);
        assert_eq!(json["feedback"]["blocking"][0]["type"], "changes_requested");
        assert_eq!(json["feedback"]["suggestion"][0]["outdated"], true);
        assert_eq!(
            json["action_required"],
            "Address blocking feedback before merge"
        );
    }
}
