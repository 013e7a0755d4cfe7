//! The two triage pipelines
//!
//! Both issue their `gh` calls one after another and hand the raw records to
//! `review_core`. They share no state; each call builds its own roster or
//! report.

mod pr_feedback;
mod review_requests;

pub use pr_feedback::{fetch_pr_feedback, FeedbackRequest};
pub use review_requests::{fetch_review_requests, resolve_roster};
