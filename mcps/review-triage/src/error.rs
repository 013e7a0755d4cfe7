//! Invocation-level errors
//!
//! Only failures that leave nothing to report end up here. Everything a
//! pipeline can work around (one team, one notification, one comment
//! source) is logged and skipped instead.

use review_core::PatternError;
use serde::Serialize;
use thiserror::Error;

use crate::gh::GhError;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Could not determine repository")]
    RepositoryUnavailable(#[source] GhError),

    #[error("invalid repository '{0}', expected OWNER/REPO")]
    InvalidRepository(String),

    #[error("a PR number is required when a repository is given")]
    PullRequestNumberRequired,

    #[error("No PR found for current branch")]
    NoPullRequestForBranch(#[source] GhError),

    #[error("PR #{number} not found")]
    PullRequestNotFound {
        number: u64,
        #[source]
        source: GhError,
    },

    #[error("no team slugs given")]
    NoTeams,

    #[error(transparent)]
    Patterns(#[from] PatternError),
}

/// The `{"error": "..."}` object printed in place of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl TriageError {
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            error: self.to_string(),
        }
    }
}
