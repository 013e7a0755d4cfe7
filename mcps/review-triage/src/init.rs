//! Tracing setup
//!
//! Logs go to stderr; stdout carries reports and the MCP protocol. Set
//! `LOG_FORMAT=json` for structured output. `RUST_LOG` adds further
//! directives on top of the verbosity flag.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber for both crates
///
/// # Arguments
///
/// * `verbose` - count of `-v` flags: 0 logs at `info`, 1 at `debug`, 2 or
///   more at `trace` for `review_triage_mcp` and `review_core`
///
/// Fails if a generated filter directive does not parse.
pub fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = level_for(verbose);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("review_triage_mcp={level}").parse()?)
        .add_directive(format!("review_core={level}").parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), "info");
        assert_eq!(level_for(1), "debug");
        assert_eq!(level_for(5), "trace");
    }
}
