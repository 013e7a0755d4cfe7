//! Review Core - classification rules for code-review artifacts
//!
//! Turns raw GitHub records into triaged reports. Nothing in this crate
//! performs I/O; records come from a collaborator (see `review-triage-mcp`).
//!
//! - **Feedback**: reviews, review threads, and conversation comments are
//!   merged into `blocking` / `suggestion` / `bot` / `resolved` buckets
//! - **Relevance**: review-request notifications are filtered down to the
//!   PRs that concern a roster of teams
//!
//! # Example
//!
//! ```rust,ignore
//! use review_core::{FeedbackReport, FeedbackRules};
//!
//! let rules = FeedbackRules::builtin();
//! let report = FeedbackReport::from_records(&rules, &pr_context, &threads, &comments);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

pub mod bots;
pub mod classify;
pub mod error;
pub mod feedback;
pub mod patterns;
pub mod records;
pub mod relevance;
pub mod report;
pub mod roster;

pub use bots::BotDetector;
pub use classify::{Category, Classification, ContentClassifier, Rule};
pub use error::PatternError;
pub use feedback::{CommentAggregator, FeedbackBuckets, FeedbackItem, FeedbackKind};
pub use patterns::{FeedbackRules, PatternConfig, PatternList};
pub use relevance::{PullRef, PullRequestSummary, RelevanceRecord, RelevanceReport};
pub use report::{ActionRequired, FeedbackReport, FeedbackSummary, PrIdentity};
pub use roster::{parse_team_slugs, Roster};
