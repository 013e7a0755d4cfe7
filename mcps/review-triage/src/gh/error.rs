//! Error types for gh CLI operations
//!
//! Failures here are transport failures. The pipelines downgrade most of
//! them to "no data" and only surface the ones that make an invocation
//! impossible.

use thiserror::Error;

/// Errors that can occur when executing gh CLI commands
#[derive(Error, Debug)]
pub enum GhError {
    /// The gh command failed with a non-zero exit code
    #[error("gh command failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code from the gh process
        code: i32,
        /// Standard error output from gh
        stderr: String,
    },

    /// Failed to spawn the gh process
    #[error("failed to spawn gh process: {0}")]
    SpawnError(#[from] std::io::Error),

    /// Failed to parse JSON output from gh
    #[error("failed to parse gh JSON output: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The GraphQL endpoint answered with errors and no data
    #[error("GraphQL query failed: {0}")]
    GraphQl(String),

    /// The command succeeded but printed nothing
    #[error("gh returned no output")]
    EmptyOutput,

    /// gh CLI is not installed or not in PATH
    #[error("gh CLI not found - ensure gh is installed and in PATH")]
    NotFound,

    /// gh CLI is not authenticated
    #[error("gh CLI not authenticated - run 'gh auth login' first")]
    NotAuthenticated,
}

/// Result type alias for gh operations
pub type GhResult<T> = Result<T, GhError>;
