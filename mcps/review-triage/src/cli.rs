//! Command-line interface
//!
//! `requests` and `feedback` print one JSON report to stdout; failures print
//! `{"error": ...}` instead and exit non-zero. `serve` runs the MCP server
//! over stdio.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use serde::Serialize;

use crate::config::Config;
use crate::error::TriageError;
use crate::gh::{self, GhSource};
use crate::handlers::resolve_teams;
use crate::pipeline::{self, FeedbackRequest};
use crate::server::ReviewTriageMcpServer;

#[derive(Parser)]
#[command(name = "review-triage")]
#[command(about = "Triage GitHub review requests and PR feedback via the gh CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: $REVIEW_TRIAGE_CONFIG_PATH or ~/.binks/review-triage.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review-request notifications relevant to a set of teams
    Requests {
        /// GitHub organization (default: from config, "getsentry")
        #[arg(long)]
        org: Option<String>,
        /// Comma-separated team slugs (default: from config)
        #[arg(long)]
        teams: Option<String>,
    },
    /// Categorized review feedback on one pull request
    Feedback {
        /// PR number (default: the current branch's PR)
        #[arg(long)]
        pr: Option<u64>,
        /// Repository as OWNER/REPO (default: current directory; requires --pr)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Run as an MCP server on stdio
    Serve,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome<T: Serialize>(outcome: Result<T, TriageError>) -> anyhow::Result<ExitCode> {
    match outcome {
        Ok(report) => {
            print_json(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "triage failed");
            print_json(&e.to_report())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Requests { org, teams } => {
            let org = org.unwrap_or_else(|| config.review_requests.default_org.clone());
            let teams = resolve_teams(teams.as_deref(), &config);
            let outcome = pipeline::fetch_review_requests(&GhSource, &org, &teams).await;
            print_outcome(outcome)
        }
        Commands::Feedback { pr, repo } => {
            let rules = match config.patterns.compile() {
                Ok(rules) => rules,
                Err(e) => return print_outcome::<()>(Err(e.into())),
            };
            let request = FeedbackRequest { repo, pr };
            let outcome = pipeline::fetch_pr_feedback(&GhSource, &rules, &request).await;
            print_outcome(outcome)
        }
        Commands::Serve => {
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting review-triage MCP Server");

    if let Err(e) = gh::check_gh_available().await {
        tracing::warn!("gh CLI check failed: {}", e);
    }

    let server = ReviewTriageMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requests() {
        let cli = Cli::parse_from(["review-triage", "requests", "--teams", "a,b", "-vv"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Requests { org, teams } => {
                assert!(org.is_none());
                assert_eq!(teams.as_deref(), Some("a,b"));
            }
            _ => panic!("expected requests"),
        }
    }

    #[test]
    fn test_parse_feedback_with_repo() {
        let cli = Cli::parse_from([
            "review-triage",
            "--config",
            "/tmp/rt.toml",
            "feedback",
            "--pr",
            "42",
            "--repo",
            "acme/widgets",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rt.toml")));
        match cli.command {
            Commands::Feedback { pr, repo } => {
                assert_eq!(pr, Some(42));
                assert_eq!(repo.as_deref(), Some("acme/widgets"));
            }
            _ => panic!("expected feedback"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_pr() {
        assert!(Cli::try_parse_from(["review-triage", "feedback", "--pr", "abc"]).is_err());
    }
}
