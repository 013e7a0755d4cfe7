//! Feedback items and the comment aggregator
//!
//! The aggregator merges the three comment sources of one pull request into
//! category buckets:
//!
//! 1. reviews submitted with `CHANGES_REQUESTED` (always blocking)
//! 2. inline review threads, classified by their first comment only
//! 3. conversation comments on the PR
//!
//! Comments by the PR author or by a deleted account (no login), and bodies
//! shorter than [`MIN_BODY_CHARS`], never reach a bucket.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::classify::Category;
use crate::patterns::FeedbackRules;
use crate::records::{login_of, IssueComment, Review, ReviewThread, CHANGES_REQUESTED};

/// Maximum characters kept in an item's summary body
pub const SUMMARY_CHARS: usize = 200;

/// Bodies shorter than this (after trimming) are ignored
pub const MIN_BODY_CHARS: usize = 3;

/// Origin tag attached to some feedback items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    ChangesRequested,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One normalized piece of review feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub author: String,

    /// Truncated, single-line summary of the body
    pub body: String,

    pub full_body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub resolved: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub outdated: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FeedbackKind>,
}

impl FeedbackItem {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        let full_body = body.into();
        Self {
            author: author.into(),
            body: summarize(&full_body),
            full_body,
            path: None,
            line: None,
            url: None,
            resolved: false,
            outdated: false,
            kind: None,
        }
    }

    pub fn with_location(mut self, path: Option<String>, line: Option<u64>) -> Self {
        self.path = path.filter(|p| !p.is_empty());
        self.line = line.filter(|l| *l > 0);
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url.filter(|u| !u.is_empty());
        self
    }

    pub fn with_flags(mut self, resolved: bool, outdated: bool) -> Self {
        self.resolved = resolved;
        self.outdated = outdated;
        self
    }

    pub fn with_kind(mut self, kind: FeedbackKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Summary form of a comment body: first [`SUMMARY_CHARS`] characters
/// (plus "..." when cut), newlines collapsed to spaces, trimmed.
pub fn summarize(body: &str) -> String {
    let cut = match body.char_indices().nth(SUMMARY_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    };
    cut.replace('\n', " ").trim().to_string()
}

/// True when a body carries too little text to be feedback
pub fn is_negligible(body: &str) -> bool {
    body.trim().chars().count() < MIN_BODY_CHARS
}

/// Feedback items grouped by category, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackBuckets {
    pub blocking: Vec<FeedbackItem>,
    pub suggestion: Vec<FeedbackItem>,
    pub bot: Vec<FeedbackItem>,
    pub resolved: Vec<FeedbackItem>,
}

impl FeedbackBuckets {
    pub fn push(&mut self, category: Category, item: FeedbackItem) {
        self.bucket_mut(category).push(item);
    }

    pub fn get(&self, category: Category) -> &[FeedbackItem] {
        match category {
            Category::Blocking => &self.blocking,
            Category::Suggestion => &self.suggestion,
            Category::Bot => &self.bot,
            Category::Resolved => &self.resolved,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<FeedbackItem> {
        match category {
            Category::Blocking => &mut self.blocking,
            Category::Suggestion => &mut self.suggestion,
            Category::Bot => &mut self.bot,
            Category::Resolved => &mut self.resolved,
        }
    }

    pub fn total(&self) -> usize {
        self.blocking.len() + self.suggestion.len() + self.bot.len() + self.resolved.len()
    }
}

/// Merges review, thread, and conversation comments into [`FeedbackBuckets`]
pub struct CommentAggregator<'a> {
    rules: &'a FeedbackRules,
    pr_author: &'a str,
    seen_threads: HashSet<String>,
    seen_comments: HashSet<u64>,
    buckets: FeedbackBuckets,
}

impl<'a> CommentAggregator<'a> {
    pub fn new(rules: &'a FeedbackRules, pr_author: &'a str) -> Self {
        Self {
            rules,
            pr_author,
            seen_threads: HashSet::new(),
            seen_comments: HashSet::new(),
            buckets: FeedbackBuckets::default(),
        }
    }

    /// Reviews requesting changes become blocking items
    pub fn add_reviews(&mut self, reviews: &[Review]) {
        for review in reviews {
            if review.state != CHANGES_REQUESTED {
                continue;
            }
            let author = login_of(&review.author);
            let body = review.body.as_deref().unwrap_or_default();
            if author.is_empty() || body.trim().is_empty() || author == self.pr_author {
                continue;
            }

            let item = FeedbackItem::new(author, body).with_kind(FeedbackKind::ChangesRequested);
            self.buckets.push(Category::Blocking, item);
        }
    }

    /// Inline review threads, routed resolved → bot → content classifier
    pub fn add_threads(&mut self, threads: &[ReviewThread]) {
        for thread in threads {
            let Some(first) = thread.first_comment() else {
                continue;
            };

            if let Some(id) = &thread.id {
                if !self.seen_threads.insert(id.clone()) {
                    debug!(thread = %id, "skipping duplicate review thread");
                    continue;
                }
            }

            let author = login_of(&first.author);
            let body = first.body.as_deref().unwrap_or_default();
            if author.is_empty() || author == self.pr_author || is_negligible(body) {
                continue;
            }

            let item = FeedbackItem::new(author, body)
                .with_location(thread.path.clone(), thread.line)
                .with_flags(thread.is_resolved, thread.is_outdated);

            let category = if thread.is_resolved {
                Category::Resolved
            } else {
                self.route(author, body)
            };
            self.buckets.push(category, item);
        }
    }

    /// General PR conversation comments; these have no resolved state
    pub fn add_conversation(&mut self, comments: &[IssueComment]) {
        for comment in comments {
            if let Some(id) = comment.id {
                if !self.seen_comments.insert(id) {
                    debug!(comment = id, "skipping duplicate conversation comment");
                    continue;
                }
            }

            let author = login_of(&comment.user);
            let body = comment.body.as_deref().unwrap_or_default();
            if author.is_empty() || author == self.pr_author || is_negligible(body) {
                continue;
            }

            let item = FeedbackItem::new(author, body).with_url(comment.html_url.clone());
            let category = self.route(author, body);
            self.buckets.push(category, item);
        }
    }

    fn route(&self, author: &str, body: &str) -> Category {
        if self.rules.bots.is_bot(author) {
            return Category::Bot;
        }
        let result = self.rules.classifier.classify(body);
        debug!(
            author,
            category = %result.category,
            pattern = self.rules.classifier.describe(result.rule).unwrap_or("default"),
            "classified comment"
        );
        result.category
    }

    pub fn finish(self) -> FeedbackBuckets {
        self.buckets
    }
}
