//! MCP server exposing the triage pipelines as tools

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use review_core::FeedbackRules;

use crate::config::Config;
use crate::error::TriageError;
use crate::gh::{GhSource, ReviewSource};
use crate::handlers;
use crate::params::{PrFeedbackParams, ReviewRequestsParams};

#[derive(Clone)]
pub struct ReviewTriageMcpServer {
    source: Arc<dyn ReviewSource>,
    config: Arc<Config>,
    rules: Arc<FeedbackRules>,
    tool_router: ToolRouter<Self>,
}

impl ReviewTriageMcpServer {
    /// Server backed by the gh CLI
    pub fn new(config: Config) -> Result<Self, TriageError> {
        Self::with_source(config, Arc::new(GhSource))
    }

    /// Server backed by any record source; compiles the configured patterns
    pub fn with_source(config: Config, source: Arc<dyn ReviewSource>) -> Result<Self, TriageError> {
        let rules = config.patterns.compile()?;
        Ok(Self {
            source,
            config: Arc::new(config),
            rules: Arc::new(rules),
            tool_router: Self::tool_router(),
        })
    }
}

#[tool_router]
impl ReviewTriageMcpServer {
    #[tool(
        description = "List unread review-request notifications for open PRs that concern the given teams: \
                       a team was requested as reviewer or the author is a team member"
    )]
    async fn review_requests(
        &self,
        Parameters(params): Parameters<ReviewRequestsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::review_requests(self.source.as_ref(), &self.config, params).await
    }

    #[tool(
        description = "Categorize all review feedback on a PR into blocking, suggestion, bot, and resolved. \
                       Defaults to the PR of the current branch"
    )]
    async fn pr_feedback(
        &self,
        Parameters(params): Parameters<PrFeedbackParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pr_feedback(self.source.as_ref(), &self.rules, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ReviewTriageMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Review triage MCP Server - finds review requests relevant to your teams and \
                 sorts PR feedback by urgency using the gh CLI. Requires gh to be installed \
                 and authenticated."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_both_tools() {
        let server = ReviewTriageMcpServer::new(Config::default()).unwrap();
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();

        assert!(names.contains(&"review_requests".to_string()));
        assert!(names.contains(&"pr_feedback".to_string()));
    }

    #[test]
    fn test_with_source_compiles_configured_patterns() {
        let mut config = Config::default();
        config.review_requests.default_org = "acme".to_string();
        config.patterns.extra_bots = vec!["^deploy-train".to_string()];

        let server = ReviewTriageMcpServer::with_source(config, Arc::new(GhSource)).unwrap();
        assert_eq!(server.config.review_requests.default_org, "acme");
        assert!(server.rules.bots.is_bot("deploy-train-7"));
        assert!(server.rules.bots.is_bot("dependabot"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut config = Config::default();
        config.patterns.extra_blocking = vec!["(unclosed".to_string()];

        let result = ReviewTriageMcpServer::new(config);
        assert!(matches!(result, Err(TriageError::Patterns(_))));
    }
}
