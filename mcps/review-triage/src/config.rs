//! Configuration loading for review-triage
//!
//! Configuration is loaded from:
//! 1. `--config PATH` on the command line
//! 2. Environment variable REVIEW_TRIAGE_CONFIG_PATH
//! 3. ~/.binks/review-triage.toml
//! 4. Default values
//!
//! `REVIEW_TRIAGE_ORG` overrides the default organization.

use anyhow::{bail, Result};
use review_core::PatternConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults for the review-request filter
    #[serde(default)]
    pub review_requests: ReviewRequestsConfig,
    /// Bot / blocking / suggestion pattern overrides
    #[serde(default)]
    pub patterns: PatternConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequestsConfig {
    /// Organization used when none is given
    #[serde(default = "default_org")]
    pub default_org: String,
    /// Team slugs used when none are given
    #[serde(default)]
    pub default_teams: Vec<String>,
}

fn default_org() -> String {
    "getsentry".to_string()
}

impl Default for ReviewRequestsConfig {
    fn default() -> Self {
        Self {
            default_org: default_org(),
            default_teams: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration, preferring an explicit path over the standard
    /// locations
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Self::read(path)?
            }
            None => match Self::find_config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => {
                    tracing::info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(org) = std::env::var("REVIEW_TRIAGE_ORG") {
            config.review_requests.default_org = org;
        }

        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("REVIEW_TRIAGE_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".binks").join("review-triage.toml");
            return Some(path);
        }

        None
    }
}
