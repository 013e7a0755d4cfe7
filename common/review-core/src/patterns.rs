//! Pattern tables for bot detection and content classification
//!
//! The built-in tables are plain data. Operators extend or replace them
//! through [`PatternConfig`] (the `[patterns]` table of the config file);
//! the detector and classifier only ever see a compiled [`PatternList`].

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::bots::BotDetector;
use crate::classify::ContentClassifier;
use crate::error::PatternError;

/// Logins of automation accounts. Matched case-insensitively.
pub const DEFAULT_BOT_PATTERNS: &[&str] = &[
    r"bot$",
    r"^codecov",
    r"^sentry",
    r"^dependabot",
    r"^renovate",
    r"^github-actions",
    r"^mergify",
    r"^semantic-release",
    r"^sonarcloud",
    r"^snyk",
    r"^cursor",
    r"^bugbot",
    r"^seer",
    r"^copilot",
    r"\[bot\]$",
];

/// Phrases that mark a comment as blocking
pub const DEFAULT_BLOCKING_PATTERNS: &[&str] = &[
    r"must\s+(fix|change|update|address)",
    r"please\s+(fix|change|update|address)",
    r"this\s+(is\s+)?(wrong|incorrect|broken|buggy)",
    r"security\s+(issue|vulnerability|concern)",
    r"will\s+(break|cause|fail)",
    r"critical",
    r"blocker",
];

/// Phrases that mark a comment as a suggestion
pub const DEFAULT_SUGGESTION_PATTERNS: &[&str] = &[
    r"nit[:\s]",
    r"nitpick",
    r"suggestion[:\s]",
    r"consider\s+",
    r"could\s+(also\s+)?",
    r"might\s+(want\s+to|be\s+better)",
    r"optional[:\s]",
    r"minor[:\s]",
    r"style[:\s]",
    r"prefer\s+",
    r"what\s+do\s+you\s+think",
    r"up\s+to\s+you",
    r"take\s+it\s+or\s+leave",
    r"fwiw",
];

/// An ordered, compiled, case-insensitive pattern table
#[derive(Debug, Clone)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compile `patterns` in order. `table` names the table in errors.
    pub fn compile<I, S>(table: &'static str, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PatternError {
                        table,
                        pattern: p.as_ref().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Index of the first pattern that matches anywhere in `text`
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.patterns.iter().position(|re| re.is_match(text))
    }

    /// Source text of the pattern at `index`
    pub fn pattern(&self, index: usize) -> Option<&str> {
        self.patterns.get(index).map(Regex::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// User overrides for the pattern tables
///
/// A `Some` replacement list takes the place of the built-in table; the
/// `extra_*` lists are appended after whichever base table is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default)]
    pub bots: Option<Vec<String>>,
    #[serde(default)]
    pub extra_bots: Vec<String>,

    #[serde(default)]
    pub blocking: Option<Vec<String>>,
    #[serde(default)]
    pub extra_blocking: Vec<String>,

    #[serde(default)]
    pub suggestion: Option<Vec<String>>,
    #[serde(default)]
    pub extra_suggestion: Vec<String>,
}

impl PatternConfig {
    /// Effective bot table
    pub fn bot_patterns(&self) -> Vec<String> {
        merge(&self.bots, DEFAULT_BOT_PATTERNS, &self.extra_bots)
    }

    /// Effective blocking table
    pub fn blocking_patterns(&self) -> Vec<String> {
        merge(&self.blocking, DEFAULT_BLOCKING_PATTERNS, &self.extra_blocking)
    }

    /// Effective suggestion table
    pub fn suggestion_patterns(&self) -> Vec<String> {
        merge(
            &self.suggestion,
            DEFAULT_SUGGESTION_PATTERNS,
            &self.extra_suggestion,
        )
    }

    /// Compile the effective tables into detector and classifier
    pub fn compile(&self) -> Result<FeedbackRules, PatternError> {
        Ok(FeedbackRules {
            bots: BotDetector::new(&self.bot_patterns())?,
            classifier: ContentClassifier::new(
                &self.blocking_patterns(),
                &self.suggestion_patterns(),
            )?,
        })
    }
}

fn merge(replacement: &Option<Vec<String>>, defaults: &[&str], extra: &[String]) -> Vec<String> {
    let base = match replacement {
        Some(list) => list.clone(),
        None => defaults.iter().map(|p| p.to_string()).collect(),
    };
    base.into_iter().chain(extra.iter().cloned()).collect()
}

/// Compiled detector and classifier used by the comment aggregator
#[derive(Debug, Clone)]
pub struct FeedbackRules {
    pub bots: BotDetector,
    pub classifier: ContentClassifier,
}

impl FeedbackRules {
    /// Rules compiled from the built-in tables
    pub fn builtin() -> Self {
        PatternConfig::default()
            .compile()
            .expect("built-in pattern tables are valid regexes")
    }
}
