//! Error types for the classification core

use thiserror::Error;

/// A pattern table entry that failed to compile
#[derive(Error, Debug)]
#[error("invalid {table} pattern '{pattern}': {source}")]
pub struct PatternError {
    /// Which table the pattern belongs to (bot, blocking, suggestion)
    pub table: &'static str,
    /// The offending pattern text
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
