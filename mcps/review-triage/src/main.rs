//! review-triage: GitHub review triage on top of the gh CLI
//!
//! ```bash
//! review-triage requests --teams streaming-platform,ingest
//! review-triage feedback --pr 1234 --repo getsentry/sentry
//! review-triage serve
//! ```
//!
//! Or configure the server in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "review-triage": {
//!       "command": "./target/release/review-triage",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```

use std::process::ExitCode;

use clap::Parser;
use review_triage_mcp::cli::{self, Cli};
use review_triage_mcp::init::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    cli::run(cli).await
}
