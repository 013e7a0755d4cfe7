//! Async executor for gh CLI commands
//!
//! Every call goes through [`run_gh`], which spawns `gh`, waits for it, and
//! maps failures onto [`GhError`]. The typed helpers on top parse stdout.
//!
//! # Example
//!
//! ```rust,ignore
//! use review_triage_mcp::gh::executor::execute_gh_api_paginated;
//! use review_core::records::Notification;
//!
//! let notifications: Vec<Notification> =
//!     execute_gh_api_paginated("notifications").await?;
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{GhError, GhResult};

fn is_auth_failure(stderr: &str) -> bool {
    stderr.contains("gh auth login") || stderr.contains("not logged in")
}

/// Spawn `gh` with `args` and return stdout of a successful run
#[instrument(fields(cmd = %args.join(" ")))]
pub async fn run_gh(args: &[&str]) -> GhResult<Vec<u8>> {
    debug!("executing: gh {}", args.join(" "));

    let output = Command::new("gh")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GhError::NotFound
            } else {
                GhError::SpawnError(e)
            }
        })?
        .wait_with_output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        if is_auth_failure(&stderr) {
            error!("gh authentication required");
            return Err(GhError::NotAuthenticated);
        }

        error!(code, stderr = %stderr, "gh command failed");
        return Err(GhError::CommandFailed { code, stderr });
    }

    Ok(output.stdout)
}

/// Execute a gh subcommand with `--json <fields>` and parse the output
///
/// # Arguments
///
/// * `args` - Command arguments (e.g., `["pr", "view", "-R", "owner/repo"]`)
/// * `json_fields` - Fields to request (e.g., `["number", "author"]`)
pub async fn execute_gh_json<T: DeserializeOwned>(
    args: &[&str],
    json_fields: &[&str],
) -> GhResult<T> {
    let fields = json_fields.join(",");

    let mut full_args: Vec<&str> = args.to_vec();
    full_args.push("--json");
    full_args.push(&fields);

    let stdout = run_gh(&full_args).await?;
    parse_single(&stdout)
}

/// `gh api <path>` returning a single JSON object
pub async fn execute_gh_api<T: DeserializeOwned>(path: &str) -> GhResult<T> {
    let stdout = run_gh(&["api", path]).await?;
    parse_single(&stdout)
}

/// `gh api --paginate <path>` for endpoints that return arrays
///
/// Pages are flattened in order. An empty response is an empty list.
pub async fn execute_gh_api_paginated<T: DeserializeOwned>(path: &str) -> GhResult<Vec<T>> {
    let stdout = run_gh(&["api", path, "--paginate"]).await?;
    parse_pages(&stdout)
}

/// A GraphQL variable passed to `gh api graphql`
#[derive(Debug, Clone)]
pub enum GraphQlVar<'a> {
    /// Sent with `-f` (always a string)
    Str(&'a str, &'a str),
    /// Sent with `-F` (gh converts numbers and booleans)
    Typed(&'a str, String),
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// `gh api graphql -f query=...` returning the `data` member
pub async fn execute_gh_graphql<T: DeserializeOwned>(
    query: &str,
    vars: &[GraphQlVar<'_>],
) -> GhResult<T> {
    let query_arg = format!("query={}", query);
    let var_args: Vec<(&str, String)> = vars
        .iter()
        .map(|v| match v {
            GraphQlVar::Str(name, value) => ("-f", format!("{}={}", name, value)),
            GraphQlVar::Typed(name, value) => ("-F", format!("{}={}", name, value)),
        })
        .collect();

    let mut args: Vec<&str> = vec!["api", "graphql", "-f", &query_arg];
    for (flag, value) in &var_args {
        args.push(flag);
        args.push(value);
    }

    let stdout = run_gh(&args).await?;
    parse_graphql(&stdout)
}

fn parse_single<T: DeserializeOwned>(stdout: &[u8]) -> GhResult<T> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(GhError::EmptyOutput);
    }
    Ok(serde_json::from_slice(stdout)?)
}

/// Parse `--paginate` output, which is one JSON array per page printed
/// back to back
pub fn parse_pages<T: DeserializeOwned>(stdout: &[u8]) -> GhResult<Vec<T>> {
    let mut items = Vec::new();
    for page in serde_json::Deserializer::from_slice(stdout).into_iter::<Vec<T>>() {
        items.extend(page?);
    }
    Ok(items)
}

fn parse_graphql<T: DeserializeOwned>(stdout: &[u8]) -> GhResult<T> {
    let response: GraphQlResponse<T> = parse_single(stdout)?;
    match response.data {
        Some(data) => Ok(data),
        None => {
            let message = response
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            Err(GhError::GraphQl(message))
        }
    }
}

/// Check if gh CLI is available and authenticated
#[instrument]
pub async fn check_gh_available() -> GhResult<()> {
    debug!("checking gh availability");
    run_gh(&["auth", "status"]).await?;
    debug!("gh is available and authenticated");
    Ok(())
}
