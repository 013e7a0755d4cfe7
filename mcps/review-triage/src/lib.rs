//! Review triage library
//!
//! Answers two questions through the `gh` CLI:
//! - which unread review requests concern my teams
//! - what feedback on this PR still needs attention
//!
//! Classification lives in `review_core`; this crate fetches the records,
//! runs the pipelines, and exposes them as a CLI and as MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use review_triage_mcp::{pipeline, GhSource};
//!
//! let report = pipeline::fetch_review_requests(&GhSource, "getsentry", &teams).await?;
//! ```
//!
//! # Requirements
//! - `gh` CLI installed and authenticated (`gh auth login`)

pub mod cli;
pub mod config;
pub mod error;
pub mod gh;
pub mod handlers;
pub mod init;
pub mod params;
pub mod pipeline;
pub mod server;

pub use config::Config;
pub use error::{ErrorReport, TriageError};
pub use gh::{GhSource, ReviewSource};
pub use pipeline::FeedbackRequest;
pub use server::ReviewTriageMcpServer;
