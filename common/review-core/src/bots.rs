//! Bot account detection

use crate::error::PatternError;
use crate::patterns::{PatternList, DEFAULT_BOT_PATTERNS};

/// Case-insensitive login matcher for automation accounts
#[derive(Debug, Clone)]
pub struct BotDetector {
    patterns: PatternList,
}

impl BotDetector {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            patterns: PatternList::compile("bot", patterns)?,
        })
    }

    /// Detector over [`DEFAULT_BOT_PATTERNS`]
    pub fn builtin() -> Self {
        Self::new(DEFAULT_BOT_PATTERNS).expect("built-in bot patterns are valid regexes")
    }

    pub fn is_bot(&self, login: &str) -> bool {
        self.patterns.first_match(login).is_some()
    }

    pub fn patterns(&self) -> &PatternList {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_patterns() {
        let bots = BotDetector::builtin();
        assert!(bots.is_bot("release-bot"));
        assert!(bots.is_bot("ReleaseBOT"));
        assert!(bots.is_bot("github-actions[bot]"));
        assert!(bots.is_bot("some-app[BOT]"));
    }

    #[test]
    fn test_known_prefixes() {
        let bots = BotDetector::builtin();
        for login in [
            "codecov-commenter",
            "sentry-io",
            "Dependabot",
            "renovate-approve",
            "github-actions",
            "mergify",
            "semantic-release-bot",
            "sonarcloud",
            "snyk-io",
            "cursor",
            "bugbot",
            "seer-by-sentry",
            "Copilot",
        ] {
            assert!(bots.is_bot(login), "{login} should be a bot");
        }
    }

    #[test]
    fn test_humans_are_not_bots() {
        let bots = BotDetector::builtin();
        assert!(!bots.is_bot("alice"));
        assert!(!bots.is_bot("robotics-fan"));
        assert!(!bots.is_bot("my-sentry"));
        assert!(!bots.is_bot(""));
    }

    #[test]
    fn test_custom_table() {
        let bots = BotDetector::new(&["^ci-"]).unwrap();
        assert!(bots.is_bot("CI-runner"));
        assert!(!bots.is_bot("dependabot"));
    }
}
