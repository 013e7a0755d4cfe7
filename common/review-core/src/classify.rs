//! Content classification of human review comments
//!
//! Blocking patterns are checked first; a comment that matches none of them
//! is a suggestion, whether or not it matched a suggestion pattern. There is
//! no scoring: the first table with a hit decides.

use serde::{Deserialize, Serialize};

use crate::error::PatternError;
use crate::patterns::{PatternList, DEFAULT_BLOCKING_PATTERNS, DEFAULT_SUGGESTION_PATTERNS};

/// Feedback bucket a comment lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Blocking,
    Suggestion,
    Bot,
    Resolved,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Blocking => "blocking",
            Category::Suggestion => "suggestion",
            Category::Bot => "bot",
            Category::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule decided a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Index into the blocking table
    Blocking(usize),
    /// Index into the suggestion table
    Suggestion(usize),
    /// Nothing matched
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub rule: Rule,
}

/// Classifies a comment body as blocking or suggestion
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    blocking: PatternList,
    suggestion: PatternList,
}

impl ContentClassifier {
    pub fn new<B, S>(blocking: &[B], suggestion: &[S]) -> Result<Self, PatternError>
    where
        B: AsRef<str>,
        S: AsRef<str>,
    {
        Ok(Self {
            blocking: PatternList::compile("blocking", blocking)?,
            suggestion: PatternList::compile("suggestion", suggestion)?,
        })
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_BLOCKING_PATTERNS, DEFAULT_SUGGESTION_PATTERNS)
            .expect("built-in classifier patterns are valid regexes")
    }

    /// Classify `body`. Only ever yields [`Category::Blocking`] or
    /// [`Category::Suggestion`].
    pub fn classify(&self, body: &str) -> Classification {
        if let Some(index) = self.blocking.first_match(body) {
            return Classification {
                category: Category::Blocking,
                rule: Rule::Blocking(index),
            };
        }

        let rule = match self.suggestion.first_match(body) {
            Some(index) => Rule::Suggestion(index),
            None => Rule::Default,
        };
        Classification {
            category: Category::Suggestion,
            rule,
        }
    }

    /// Source text of the pattern behind `rule`, if any
    pub fn describe(&self, rule: Rule) -> Option<&str> {
        match rule {
            Rule::Blocking(i) => self.blocking.pattern(i),
            Rule::Suggestion(i) => self.suggestion.pattern(i),
            Rule::Default => None,
        }
    }
}
